//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod trip;
pub mod user;

pub use expense::{handle_expense_command, ExpenseCommands, ExportFormat};
pub use trip::{handle_trip_command, TripCommands};
pub use user::{handle_user_command, UserCommands};

use chrono::{Local, NaiveDate};

use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{Money, UserId};

/// The session user, or a precondition error when none was given
pub fn require_user(user: Option<UserId>) -> TripDeskResult<UserId> {
    user.ok_or_else(TripDeskError::no_user)
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a CHF amount given on the command line
pub fn parse_money(input: &str) -> TripDeskResult<Money> {
    Money::parse(input).map_err(|e| {
        TripDeskError::Validation(format!(
            "Invalid amount '{}'. Use a format like '120' or '45.50'. Error: {}",
            input, e
        ))
    })
}
