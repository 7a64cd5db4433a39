//! Dialog modules for the TUI

pub mod expense_wizard;
