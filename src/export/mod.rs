//! Export module for TripDesk
//!
//! Exports a user's committed expenses in multiple formats:
//! - CSV: one row per expense (spreadsheet-compatible)
//! - JSON: machine-readable full record
//! - YAML: human-readable full record

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_expenses_csv;
pub use json::{export_expenses_json, ExpenseExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_expenses_yaml;
