//! TUI Views module
//!
//! The trip dashboard and the status bar; dialogs are drawn on top.

pub mod status_bar;
pub mod trips;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    trips::render_filter(frame, app, layout.filter);
    trips::render_table(frame, app, layout.trips);
    status_bar::render(frame, app, layout.status_bar);

    match app.active_dialog {
        ActiveDialog::ExpenseWizard => dialogs::expense_wizard::render(frame, app),
        ActiveDialog::None => {}
    }
}
