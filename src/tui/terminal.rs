//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::error::TripDeskError;
use crate::models::UserId;
use crate::storage::Storage;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the trip dashboard for a user until they quit
pub fn run_tui(
    storage: &Storage,
    settings: &Settings,
    user_id: UserId,
    today: chrono::NaiveDate,
) -> Result<()> {
    // Fails before touching the terminal if the user is unknown
    let mut app = App::new(storage, settings, user_id, today)?;

    let mut terminal = init_terminal()?;
    info!(user = %user_id, "dashboard started");

    let result = event_loop(&mut terminal, &mut app);

    restore_terminal()?;
    debug!(user = %user_id, "dashboard stopped");
    result
}

fn event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let events = EventHandler::default();

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, app))?;
        let event = events
            .next()
            .map_err(|_| TripDeskError::Tui("terminal event stream closed".into()))?;
        handle_event(app, event)?;
    }

    Ok(())
}
