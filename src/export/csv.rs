//! CSV Export functionality
//!
//! One row per expense with the four category costs side by side
//! (spreadsheet-compatible).

use std::io::Write;

use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{ExpenseCategory, UserId};
use crate::services::ExpenseService;
use crate::storage::Storage;

const HEADER: [&str; 12] = [
    "ID",
    "User",
    "Trip Date",
    "City",
    "Duration (days)",
    "Hotel",
    "Transport",
    "Meals",
    "Other",
    "Total",
    "Receipts",
    "Created",
];

/// Export a user's expenses to CSV
pub fn export_expenses_csv<W: Write>(
    storage: &Storage,
    user_id: UserId,
    writer: &mut W,
) -> TripDeskResult<()> {
    let expenses = ExpenseService::new(storage).list(user_id)?;
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(HEADER)
        .map_err(|e| TripDeskError::Export(e.to_string()))?;

    for expense in &expenses {
        let mut record = vec![
            expense.id.as_uuid().to_string(),
            expense.user_id.to_string(),
            expense.trip_date.to_string(),
            expense.destination_city.name().to_string(),
            expense.duration.to_string(),
        ];
        for category in ExpenseCategory::ALL {
            let cost = expense
                .category(category)
                .map(|r| r.cost.format_plain())
                .unwrap_or_else(|| "0.00".to_string());
            record.push(cost);
        }
        record.push(expense.total_cost.format_plain());
        record.push(expense.attachment_count().to_string());
        record.push(expense.created_at.to_rfc3339());

        csv_writer
            .write_record(&record)
            .map_err(|e| TripDeskError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TripDeskError::Export(e.to_string()))?;

    Ok(())
}
