//! Expense wizard dialog
//!
//! Modal form over the dashboard. Tab moves between the inputs of the current
//! step, Ctrl-n / Ctrl-b move between steps, Enter applies the focused input
//! (or commits on the review step) and Esc hides the dialog keeping the draft.
//! Values still being typed are saved before moving between steps or closing.
//! Every applied change goes through the session controller and is saved.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::display::expense::format_commit_notice;
use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{parse_date, ExpenseCategory, Money, TripDuration};
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::centered_rect;
use crate::tui::widgets::TextInput;
use crate::wizard::{ExpenseWizard, WizardStep};

/// Input of the wizard form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardField {
    Cost,
    Receipt,
    TripDate,
    City,
    Duration,
    Commit,
}

const CATEGORY_FIELDS: [WizardField; 5] = [
    WizardField::Cost,
    WizardField::Receipt,
    WizardField::TripDate,
    WizardField::City,
    WizardField::Duration,
];

const REVIEW_FIELDS: [WizardField; 4] = [
    WizardField::Commit,
    WizardField::TripDate,
    WizardField::City,
    WizardField::Duration,
];

fn fields(step: WizardStep) -> &'static [WizardField] {
    if step.is_review() {
        &REVIEW_FIELDS
    } else {
        &CATEGORY_FIELDS
    }
}

/// Editing state of the wizard dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardFormState {
    step: WizardStep,
    pub focused: WizardField,
    pub cost_input: TextInput,
    pub receipt_input: TextInput,
    pub date_input: TextInput,
    pub duration_input: TextInput,
    pub error: Option<String>,
}

impl WizardFormState {
    /// Fresh form for the wizard's current step
    pub fn from_wizard(wizard: &ExpenseWizard) -> Self {
        let step = wizard.step();
        let mut form = Self {
            step,
            focused: fields(step)[0],
            cost_input: TextInput::new().placeholder("0.00"),
            receipt_input: TextInput::new().placeholder("path/to/receipt.pdf"),
            date_input: TextInput::new().placeholder("YYYY-MM-DD"),
            duration_input: TextInput::new().placeholder("1.5"),
            error: None,
        };
        form.refresh(wizard);
        form
    }

    /// Show the saved draft values again; focus is kept
    pub fn refresh(&mut self, wizard: &ExpenseWizard) {
        let draft = wizard.draft();

        match wizard.step().category() {
            Some(category) if !draft.entry(category).cost().is_zero() => {
                self.cost_input.set(draft.entry(category).cost().format_plain());
            }
            _ => self.cost_input.clear(),
        }
        self.date_input
            .set(draft.trip_date().format("%Y-%m-%d").to_string());
        self.duration_input.set(draft.duration().to_string());
        self.error = None;
    }

    pub fn next_field(&mut self) {
        let fields = fields(self.step);
        let index = fields.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focused = fields[(index + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = fields(self.step);
        let index = fields.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focused = fields[(index + fields.len() - 1) % fields.len()];
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            WizardField::Cost => Some(&mut self.cost_input),
            WizardField::Receipt => Some(&mut self.receipt_input),
            WizardField::TripDate => Some(&mut self.date_input),
            WizardField::Duration => Some(&mut self.duration_input),
            WizardField::City | WizardField::Commit => None,
        }
    }
}

/// Render the wizard dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let wizard = &app.wizard;
    let form = &app.wizard_form;
    let draft = wizard.draft();
    let step = wizard.step();

    let block = Block::default()
        .title(format!(" {} ", step))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = vec![progress_line(step), Line::from("")];

    match step.category() {
        Some(category) => {
            lines.push(Line::from(Span::styled(category.label(), heading)));
            lines.push(
                form.cost_input
                    .line("Cost (CHF)", form.focused == WizardField::Cost),
            );
            lines.push(
                form.receipt_input
                    .line("Add receipt", form.focused == WizardField::Receipt),
            );

            let attachments = draft.entry(category).attachments();
            if attachments.is_empty() {
                lines.push(Line::from(Span::styled(
                    "              No receipts attached",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for (i, attachment) in attachments.iter().enumerate() {
                lines.push(Line::from(format!(
                    "              {}. {} ({}, {} bytes)",
                    i + 1,
                    attachment.filename(),
                    attachment.kind(),
                    attachment.size()
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled("Summary", heading)));
            for category in ExpenseCategory::ALL {
                let entry = draft.entry(category);
                lines.push(Line::from(format!(
                    "  {:<10} {:>16}  {} receipt(s)",
                    category.label(),
                    entry.cost().to_string(),
                    entry.attachments().len()
                )));
            }
            let commit_style = if form.focused == WizardField::Commit {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green)
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("[ Commit expense ]", commit_style)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Trip", heading)));
    lines.push(
        form.date_input
            .line("Trip date", form.focused == WizardField::TripDate),
    );
    lines.push(city_line(app));
    lines.push(
        form.duration_input
            .line("Days", form.focused == WizardField::Duration),
    );

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Total (CHF): "),
        Span::styled(
            draft.total().format_grouped(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(""));
    lines.push(hint_line(step));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn progress_line(step: WizardStep) -> Line<'static> {
    let steps = [
        WizardStep::Hotel,
        WizardStep::Transport,
        WizardStep::Meals,
        WizardStep::Other,
        WizardStep::Review,
    ];
    let mut spans = Vec::new();
    for s in steps {
        let name = s.category().map(|c| c.label()).unwrap_or("Review");
        let style = if s == step {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else if s < step {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} {} ", s.number(), name), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn city_line(app: &App) -> Line<'static> {
    let focused = app.wizard_form.focused == WizardField::City;
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let city = app.wizard.draft().destination_city();
    let value = if focused {
        Span::styled(
            format!("< {} >", city),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        )
    } else {
        Span::styled(city.to_string(), Style::default().fg(Color::Yellow))
    };
    Line::from(vec![Span::styled(format!("{:>12}: ", "City"), label_style), value])
}

fn hint_line(step: WizardStep) -> Line<'static> {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = vec![
        Span::styled("[Tab]", key),
        Span::raw(" Field  "),
        Span::styled("[Ctrl-n]", key),
        Span::raw(" Next  "),
        Span::styled("[Ctrl-b]", key),
        Span::raw(" Back  "),
    ];
    if step.is_review() {
        spans.push(Span::styled("[Enter]", Style::default().fg(Color::Green)));
        spans.push(Span::raw(" Apply/Commit  "));
    } else {
        spans.push(Span::styled("[Enter]", Style::default().fg(Color::Green)));
        spans.push(Span::raw(" Apply  "));
        spans.push(Span::styled("[Ctrl-d]", key));
        spans.push(Span::raw(" Remove last receipt  "));
    }
    spans.push(Span::styled("[Esc]", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Close"));
    Line::from(spans)
}

/// Handle key input for the wizard dialog
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            if !flush_pending(app) {
                return true;
            }
            if let Err(e) = app.close_wizard() {
                app.wizard_form.error = Some(e.to_string());
            } else {
                app.set_status("Expense wizard closed, draft kept");
            }
        }

        KeyCode::Char('n') if ctrl => {
            if flush_pending(app) {
                let result = app.wizard_service().next(app.user_id);
                apply(app, result, None);
            }
        }

        KeyCode::Char('b') if ctrl => {
            if flush_pending(app) {
                let result = app.wizard_service().back(app.user_id);
                apply(app, result, None);
            }
        }

        KeyCode::Char('d') if ctrl => remove_last_receipt(app),

        KeyCode::Tab => app.wizard_form.next_field(),
        KeyCode::BackTab => app.wizard_form.prev_field(),

        KeyCode::Enter => submit_focused(app),

        KeyCode::Left | KeyCode::Right if app.wizard_form.focused == WizardField::City => {
            let current = app.wizard.draft().destination_city();
            let city = if key.code == KeyCode::Left {
                current.cycle_prev()
            } else {
                current.cycle_next()
            };
            let result = app.wizard_service().set_destination_city(app.user_id, city);
            apply(app, result, Some(format!("Destination set to {}", city)));
        }

        code => {
            let Some(input) = app.wizard_form.focused_input() else {
                return false;
            };
            match code {
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_start(),
                KeyCode::End => input.move_end(),
                KeyCode::Char(c) if !ctrl => input.insert(c),
                _ => return false,
            }
            app.wizard_form.error = None;
        }
    }

    true
}

/// Take over a controller result, or show its error in the form
fn apply(app: &mut App, result: TripDeskResult<ExpenseWizard>, notice: Option<String>) {
    match result {
        Ok(wizard) => {
            app.show_wizard_state(wizard);
            if let Some(notice) = notice {
                app.set_status(notice);
            }
        }
        Err(e) => app.wizard_form.error = Some(e.to_string()),
    }
}

/// Save typed values that differ from the draft before leaving the step.
/// Returns false, with the error shown, if one of them is invalid.
fn flush_pending(app: &mut App) -> bool {
    match save_pending(app) {
        Ok(Some(wizard)) => {
            app.wizard = wizard;
            app.wizard_form.receipt_input.clear();
            true
        }
        Ok(None) => true,
        Err(e) => {
            // Earlier inputs may have been saved already
            if let Ok(wizard) = app.wizard_service().load(app.user_id) {
                app.wizard = wizard;
            }
            app.wizard_form.error = Some(e.to_string());
            false
        }
    }
}

fn save_pending(app: &App) -> TripDeskResult<Option<ExpenseWizard>> {
    let service = app.wizard_service();
    let user_id = app.user_id;
    let form = &app.wizard_form;
    let draft = app.wizard.draft();
    let mut saved = None;

    let date = parse_date(form.date_input.value())?;
    if date != draft.trip_date() {
        saved = Some(service.set_trip_date(user_id, date)?);
    }

    let days = TripDuration::parse(form.duration_input.value())
        .map_err(|e| TripDeskError::Validation(e.to_string()))?;
    if days != draft.duration() {
        saved = Some(service.set_duration(user_id, days)?);
    }

    if let Some(category) = app.wizard.step().category() {
        let cost = parse_cost(form.cost_input.value())?;
        if cost != draft.entry(category).cost() {
            saved = Some(service.set_cost(user_id, category, cost)?);
        }

        // Attached last so a failure above never attaches the file twice
        let path = form.receipt_input.value();
        if !path.is_empty() {
            saved = Some(service.attach(user_id, category, &[PathBuf::from(path)])?);
        }
    }

    Ok(saved)
}

fn remove_last_receipt(app: &mut App) {
    let Some(category) = app.wizard.step().category() else {
        return;
    };
    let count = app.wizard.draft().entry(category).attachments().len();
    if count == 0 {
        app.wizard_form.error = Some(format!("No {} receipts to remove", category.label()));
        return;
    }

    match app.wizard_service().detach(app.user_id, category, count - 1) {
        Ok((removed, wizard)) => {
            app.show_wizard_state(wizard);
            app.set_status(format!("Removed {}", removed.filename()));
        }
        Err(e) => app.wizard_form.error = Some(e.to_string()),
    }
}

fn submit_focused(app: &mut App) {
    let service = app.wizard_service();
    let user_id = app.user_id;

    match app.wizard_form.focused {
        WizardField::Cost => {
            let Some(category) = app.wizard.step().category() else {
                return;
            };
            let result = parse_cost(app.wizard_form.cost_input.value())
                .and_then(|cost| service.set_cost(user_id, category, cost));
            apply(app, result, Some(format!("{} cost saved", category.label())));
        }

        WizardField::Receipt => {
            let Some(category) = app.wizard.step().category() else {
                return;
            };
            let path = app.wizard_form.receipt_input.value().to_string();
            if path.is_empty() {
                app.wizard_form.error = Some("Enter the path of a PDF, PNG or JPEG file".into());
                return;
            }
            match service.attach(user_id, category, &[PathBuf::from(&path)]) {
                Ok(wizard) => {
                    app.show_wizard_state(wizard);
                    app.wizard_form.receipt_input.clear();
                    app.set_status(format!("Attached {}", path));
                }
                Err(e) => app.wizard_form.error = Some(e.to_string()),
            }
        }

        WizardField::TripDate => {
            let result = parse_date(app.wizard_form.date_input.value())
                .and_then(|date| service.set_trip_date(user_id, date));
            apply(app, result, Some("Trip date saved".into()));
        }

        WizardField::City => app.wizard_form.next_field(),

        WizardField::Duration => {
            let result = TripDuration::parse(app.wizard_form.duration_input.value())
                .map_err(|e| TripDeskError::Validation(e.to_string()))
                .and_then(|days| service.set_duration(user_id, days));
            apply(app, result, Some("Duration saved".into()));
        }

        WizardField::Commit => match service.commit(user_id) {
            Ok(expense) => {
                let notice = format_commit_notice(&expense);
                match service.load(user_id) {
                    Ok(wizard) => {
                        app.wizard_form = WizardFormState::from_wizard(&wizard);
                        app.wizard = wizard;
                    }
                    Err(e) => app.set_status(e.to_string()),
                }
                app.active_dialog = ActiveDialog::None;
                app.set_status(notice);
            }
            Err(e) => {
                app.wizard_form.error = Some(format!("{} Press Enter to retry.", e));
            }
        },
    }
}

/// Empty means zero
fn parse_cost(input: &str) -> TripDeskResult<Money> {
    if input.is_empty() {
        return Ok(Money::zero());
    }
    Money::parse(input)
        .map_err(|e| TripDeskError::Validation(format!("Invalid amount '{}': {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TripDeskPaths;
    use crate::config::settings::Settings;
    use crate::services::UserService;
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, crate::models::UserId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripDeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let user = UserService::new(&storage).create("Anna Keller").unwrap();
        (temp_dir, storage, user.id)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_full_flow_commits_total() {
        let (_dir, storage, user) = setup();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, user, today()).unwrap();
        app.open_wizard().unwrap();

        type_text(&mut app, "120");
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'n');
        type_text(&mut app, "45.50");
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'n');
        ctrl(&mut app, 'n');
        type_text(&mut app, "15.25");
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'n');

        assert_eq!(app.wizard.step(), WizardStep::Review);
        assert_eq!(app.wizard_form.focused, WizardField::Commit);
        assert_eq!(app.wizard.total(), Money::from_cents(18_075));

        press(&mut app, KeyCode::Enter);

        assert_eq!(app.active_dialog, ActiveDialog::None);
        assert!(app.status_message.as_deref().unwrap().contains("180.75"));
        assert_eq!(app.wizard.step(), WizardStep::Hotel);
        assert!(app.wizard.total().is_zero());
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_invalid_cost_shows_error_and_keeps_draft() {
        let (_dir, storage, user) = setup();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, user, today()).unwrap();
        app.open_wizard().unwrap();

        type_text(&mut app, "-5");
        press(&mut app, KeyCode::Enter);

        assert!(app.wizard_form.error.is_some());
        assert!(app.wizard.total().is_zero());
    }

    #[test]
    fn test_tab_cycles_fields_of_step() {
        let (_dir, storage, user) = setup();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, user, today()).unwrap();
        app.open_wizard().unwrap();

        let mut seen = vec![app.wizard_form.focused];
        for _ in 0..5 {
            press(&mut app, KeyCode::Tab);
            seen.push(app.wizard_form.focused);
        }
        assert_eq!(
            seen,
            vec![
                WizardField::Cost,
                WizardField::Receipt,
                WizardField::TripDate,
                WizardField::City,
                WizardField::Duration,
                WizardField::Cost,
            ]
        );
    }

    #[test]
    fn test_city_selector_saves_immediately() {
        let (_dir, storage, user) = setup();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, user, today()).unwrap();
        app.open_wizard().unwrap();

        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Right);

        let saved = app.wizard_service().load(user).unwrap();
        assert_eq!(saved.draft().destination_city(), crate::models::City::Geneva);
    }

    #[test]
    fn test_escape_keeps_draft() {
        let (_dir, storage, user) = setup();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, user, today()).unwrap();
        app.open_wizard().unwrap();

        type_text(&mut app, "80");
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'n');
        press(&mut app, KeyCode::Esc);
        assert!(!app.has_dialog());

        app.open_wizard().unwrap();
        assert_eq!(app.wizard.step(), WizardStep::Transport);
        assert_eq!(app.wizard.total(), Money::from_cents(8_000));
    }

    #[test]
    fn test_typed_values_survive_step_change() {
        let (_dir, storage, user) = setup();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, user, today()).unwrap();
        app.open_wizard().unwrap();

        // No Enter before moving on
        type_text(&mut app, "120");
        ctrl(&mut app, 'n');

        assert_eq!(app.wizard.step(), WizardStep::Transport);
        let saved = app.wizard_service().load(user).unwrap();
        assert_eq!(saved.draft().entry(ExpenseCategory::Hotel).cost(), Money::from_cents(12_000));

        type_text(&mut app, "45.5");
        ctrl(&mut app, 'b');
        assert_eq!(app.wizard.step(), WizardStep::Hotel);
        assert_eq!(app.wizard_form.cost_input.value(), "120.00");
        assert_eq!(app.wizard.total(), Money::from_cents(16_550));
    }

    #[test]
    fn test_typed_values_survive_close() {
        let (_dir, storage, user) = setup();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, user, today()).unwrap();
        app.open_wizard().unwrap();

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.wizard_form.focused, WizardField::Duration);
        press(&mut app, KeyCode::End);
        for _ in 0..5 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "2.5");
        press(&mut app, KeyCode::Esc);
        assert!(!app.has_dialog());

        let saved = app.wizard_service().load(user).unwrap();
        assert_eq!(saved.draft().duration(), TripDuration::parse("2.5").unwrap());
    }

    #[test]
    fn test_invalid_typed_value_blocks_step_change() {
        let (_dir, storage, user) = setup();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings, user, today()).unwrap();
        app.open_wizard().unwrap();

        type_text(&mut app, "12.345");
        ctrl(&mut app, 'n');
        assert_eq!(app.wizard.step(), WizardStep::Hotel);
        assert!(app.wizard_form.error.is_some());
        assert_eq!(app.wizard_form.cost_input.value(), "12.345");

        press(&mut app, KeyCode::Esc);
        assert!(app.has_dialog());
        assert!(app.wizard_service().load(user).unwrap().is_open());
    }
}
