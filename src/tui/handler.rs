//! Event handler for the TUI
//!
//! Routes key events to the wizard dialog when it is shown, otherwise to the
//! dashboard.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::TripDeskResult;

use super::app::{App, Focus};
use super::dialogs::expense_wizard;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) | Event::Tick => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        expense_wizard::handle_key(app, key);
        return Ok(());
    }

    match app.focus {
        Focus::From | Focus::To => handle_filter_key(app, key),
        Focus::Trips => handle_trips_key(app, key),
    }
    Ok(())
}

/// Report a failed action in the status bar
fn report(app: &mut App, result: TripDeskResult<()>) {
    if let Err(e) = result {
        app.set_status(e.to_string());
    }
}

/// Keys while a date input has focus
fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        KeyCode::Esc => app.focus = Focus::Trips,
        KeyCode::Enter => {
            app.clear_status();
            let result = app.apply_filter();
            if result.is_ok() {
                app.focus = Focus::Trips;
            }
            report(app, result);
        }
        code => {
            let Some(input) = app.focused_input() else {
                return;
            };
            match code {
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_start(),
                KeyCode::End => input.move_end(),
                KeyCode::Char(c) => input.insert(c),
                _ => {}
            }
        }
    }
}

/// Keys while the trip table has focus
fn handle_trips_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('s') => {
            let result = app.toggle_order();
            report(app, result);
        }
        KeyCode::Char('c') => app.cycle_column(),
        KeyCode::Char('t') => {
            let result = app.reset_filter();
            report(app, result);
        }
        KeyCode::Char('r') => {
            let result = app.refresh_trips();
            report(app, result);
        }
        KeyCode::Char('x') => {
            app.clear_status();
            let result = app.open_wizard();
            report(app, result);
        }
        _ => {}
    }
}
