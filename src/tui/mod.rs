//! Terminal User Interface module
//!
//! Trip dashboard built with ratatui: a date filter over the user's trips and
//! the expense wizard as a modal dialog.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

pub mod dialogs;
pub mod layout;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
