//! Expense CLI commands
//!
//! Drives the expense wizard one action per invocation and gives access to
//! committed expenses.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use super::{parse_money, require_user, today};
use crate::display::expense::{
    format_commit_notice, format_expense_details, format_expense_list, format_wizard,
};
use crate::error::{TripDeskError, TripDeskResult};
use crate::export::{export_expenses_csv, export_expenses_json, export_expenses_yaml};
use crate::models::{parse_date, City, ExpenseCategory, TripDuration, UserId};
use crate::services::{ExpenseService, ExpenseWizardService};
use crate::storage::Storage;

/// Export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Open the expense wizard, resuming any saved draft
    Open,
    /// Close the wizard; the draft is kept
    Close,
    /// Show the current wizard step
    Status,
    /// Go to the next step
    Next,
    /// Go to the previous step
    Back,
    /// Set the cost of a category
    Cost {
        /// Category (hotel, transport, meals, other)
        category: ExpenseCategory,
        /// Amount in CHF (e.g. "120.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Attach receipt files (PDF, PNG, JPEG) to a category
    Attach {
        /// Category (hotel, transport, meals, other)
        category: ExpenseCategory,
        /// Files to attach
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Remove one receipt from a category
    Detach {
        /// Category (hotel, transport, meals, other)
        category: ExpenseCategory,
        /// Receipt number as shown by `status` (starting at 1)
        index: usize,
    },
    /// Remove all receipts from a category
    Clear {
        /// Category (hotel, transport, meals, other)
        category: ExpenseCategory,
    },
    /// Set the trip date
    Date {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Set the destination city
    City {
        /// Zurich, Geneva, Basel, Bern, Lausanne, Lugano or Lucerne
        city: City,
    },
    /// Set the trip duration in days (half days allowed)
    Duration {
        /// Days, e.g. "2" or "1.5"
        #[arg(allow_hyphen_values = true)]
        days: String,
    },
    /// Submit the expense (only from the review step)
    Commit,
    /// List committed expenses
    List,
    /// Show a committed expense
    Show {
        /// Expense ID (full or exp-xxxxxxxx)
        id: String,
    },
    /// Export committed expenses
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    user: Option<UserId>,
    cmd: ExpenseCommands,
) -> TripDeskResult<()> {
    let user_id = require_user(user)?;
    let wizard = ExpenseWizardService::new(storage, today());

    match cmd {
        ExpenseCommands::Open => {
            print!("{}", format_wizard(&wizard.open(user_id)?));
        }

        ExpenseCommands::Close => {
            wizard.close(user_id)?;
            println!("Expense wizard closed. Your draft is kept; run `tripdesk expense open` to resume.");
        }

        ExpenseCommands::Status => {
            print!("{}", format_wizard(&wizard.load(user_id)?));
        }

        ExpenseCommands::Next => {
            print!("{}", format_wizard(&wizard.next(user_id)?));
        }

        ExpenseCommands::Back => {
            print!("{}", format_wizard(&wizard.back(user_id)?));
        }

        ExpenseCommands::Cost { category, amount } => {
            let cost = parse_money(&amount)?;
            let state = wizard.set_cost(user_id, category, cost)?;
            println!("{} cost set to {}", category.label(), cost);
            println!("Running total: {}", state.total());
        }

        ExpenseCommands::Attach { category, files } => {
            let state = wizard.attach(user_id, category, &files)?;
            let count = state.draft().entry(category).attachments().len();
            println!(
                "Attached {} file(s) to {} ({} in total)",
                files.len(),
                category.label(),
                count
            );
        }

        ExpenseCommands::Detach { category, index } => {
            if index == 0 {
                return Err(TripDeskError::Validation(
                    "Receipt numbers start at 1".into(),
                ));
            }
            let (removed, _) = wizard.detach(user_id, category, index - 1)?;
            println!("Removed {} from {}", removed.filename(), category.label());
        }

        ExpenseCommands::Clear { category } => {
            wizard.clear_attachments(user_id, category)?;
            println!("Removed all receipts from {}", category.label());
        }

        ExpenseCommands::Date { date } => {
            let date = parse_date(&date)?;
            wizard.set_trip_date(user_id, date)?;
            println!("Trip date set to {}", date);
        }

        ExpenseCommands::City { city } => {
            wizard.set_destination_city(user_id, city)?;
            println!("Destination set to {}", city);
        }

        ExpenseCommands::Duration { days } => {
            let duration = TripDuration::parse(&days)
                .map_err(|e| TripDeskError::Validation(e.to_string()))?;
            wizard.set_duration(user_id, duration)?;
            println!("Duration set to {} day(s)", duration);
        }

        ExpenseCommands::Commit => {
            let expense = wizard.commit(user_id)?;
            println!("{}", format_commit_notice(&expense));
        }

        ExpenseCommands::List => {
            let expenses = ExpenseService::new(storage).list(user_id)?;
            print!("{}", format_expense_list(&expenses));
        }

        ExpenseCommands::Show { id } => {
            let expense = ExpenseService::new(storage)
                .find(user_id, &id)?
                .ok_or_else(|| TripDeskError::expense_not_found(&id))?;
            print!("{}", format_expense_details(&expense));
        }

        ExpenseCommands::Export { format, output } => {
            let mut writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
                    TripDeskError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?)),
                None => Box::new(io::stdout().lock()),
            };

            match format {
                ExportFormat::Csv => export_expenses_csv(storage, user_id, &mut writer)?,
                ExportFormat::Json => export_expenses_json(storage, user_id, &mut writer)?,
                ExportFormat::Yaml => export_expenses_yaml(storage, user_id, &mut writer)?,
            }
            writer
                .flush()
                .map_err(|e| TripDeskError::Export(e.to_string()))?;

            if let Some(path) = output {
                println!("Exported expenses to {}", path.display());
            }
        }
    }

    Ok(())
}
