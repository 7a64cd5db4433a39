//! YAML Export functionality
//!
//! Exports a user's expenses to YAML for human reading.

use crate::error::{TripDeskError, TripDeskResult};
use crate::export::json::ExpenseExport;
use crate::models::UserId;
use crate::storage::Storage;
use std::io::Write;

/// Export a user's expenses to YAML format
pub fn export_expenses_yaml<W: Write>(
    storage: &Storage,
    user_id: UserId,
    writer: &mut W,
) -> TripDeskResult<()> {
    let export = ExpenseExport::from_storage(storage, user_id)?;

    writeln!(writer, "# TripDesk expense export")
        .map_err(|e| TripDeskError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| TripDeskError::Export(e.to_string()))?;
    writeln!(writer, "# User: {}", export.user_id)
        .map_err(|e| TripDeskError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TripDeskError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TripDeskError::Export(e.to_string()))?;

    Ok(())
}
