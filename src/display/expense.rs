//! Expense and wizard display formatting

use crate::models::{Expense, ExpenseCategory};
use crate::wizard::{ExpenseDraft, ExpenseWizard};

fn files(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", count)
    }
}

/// Read-only summary shown on the review step
pub fn format_review_summary(draft: &ExpenseDraft) -> String {
    let mut output = String::new();

    for category in ExpenseCategory::ALL {
        let entry = draft.entry(category);
        output.push_str(&format!(
            "- {}: {} ({})\n",
            category.label(),
            entry.cost(),
            files(entry.attachments().len())
        ));
    }
    output.push_str(&format!(
        "Calculated total (CHF): {}\n",
        draft.total().format_grouped()
    ));

    output
}

/// Format the wizard panel for the current step
pub fn format_wizard(wizard: &ExpenseWizard) -> String {
    let draft = wizard.draft();
    let step = wizard.step();
    let mut output = String::new();

    if !wizard.is_open() {
        output.push_str("Expense wizard is closed (draft kept).\n");
    }

    output.push_str(&format!("{}\n", step));
    output.push_str(&format!("  Trip date:   {}\n", draft.trip_date()));
    output.push_str(&format!("  Destination: {}\n", draft.destination_city()));
    output.push_str(&format!("  Duration:    {} day(s)\n", draft.duration()));
    output.push('\n');

    match step.category() {
        Some(category) => {
            let entry = draft.entry(category);
            output.push_str(&format!("  {} cost: {}\n", category.label(), entry.cost()));
            if entry.attachments().is_empty() {
                output.push_str("  Receipts: none\n");
            } else {
                output.push_str("  Receipts:\n");
                for (i, attachment) in entry.attachments().iter().enumerate() {
                    output.push_str(&format!(
                        "    {}. {} ({}, {} bytes)\n",
                        i + 1,
                        attachment.filename(),
                        attachment.kind(),
                        attachment.size()
                    ));
                }
            }
            output.push_str(&format!("\n  Running total: {}\n", draft.total()));
        }
        None => {
            output.push_str(&format_review_summary(draft));
            output.push_str("\nRun `tripdesk expense commit` to submit.\n");
        }
    }

    output
}

/// Notice shown after a successful commit
pub fn format_commit_notice(expense: &Expense) -> String {
    format!(
        "Expense {} saved: {} for {} on {} ({}).",
        expense.id,
        expense.total_cost,
        expense.destination_city,
        expense.trip_date,
        files(expense.attachment_count())
    )
}

/// Format a list of committed expenses
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<10}  {:>8}  {:>16}  {}\n",
        "ID", "Trip date", "City", "Days", "Total", "Receipts"
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<10}  {:->8}  {:->16}  {:-<8}\n",
        "", "", "", "", "", ""
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<10}  {:>8}  {:>16}  {}\n",
            expense.id.to_string(),
            expense.trip_date.to_string(),
            expense.destination_city.name(),
            expense.duration.to_string(),
            expense.total_cost.to_string(),
            expense.attachment_count()
        ));
    }

    output
}

/// Format a single expense with its category breakdown
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("  Trip date:   {}\n", expense.trip_date));
    output.push_str(&format!("  Destination: {}\n", expense.destination_city));
    output.push_str(&format!("  Duration:    {} day(s)\n", expense.duration));
    output.push_str(&format!("  Total:       {}\n", expense.total_cost));
    output.push('\n');

    for record in &expense.categories {
        output.push_str(&format!("  {}: {}\n", record.category.label(), record.cost));
        for stored in &record.attachments {
            output.push_str(&format!(
                "    - {} ({}, {} bytes) -> {}\n",
                stored.filename,
                stored.kind.media_type(),
                stored.size,
                stored.path
            ));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "  Filed: {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
