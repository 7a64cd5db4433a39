//! Display formatting for terminal output
//!
//! Provides utilities for formatting trips, the expense wizard and committed
//! expenses for terminal display.

pub mod expense;
pub mod trip;

pub use expense::{
    format_commit_notice, format_expense_details, format_expense_list, format_review_summary,
    format_wizard,
};
pub use trip::{format_trip_details, format_trip_table, NO_TRIPS_NOTICE};
