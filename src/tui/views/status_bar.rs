//! Status bar view
//!
//! Shows the user, the trip count, the wizard state and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![
        Span::styled(" User ", Style::default().fg(Color::White)),
        Span::styled(
            app.user_id.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("{} trip(s)", app.trips.len()),
            Style::default().fg(Color::Cyan),
        ),
    ];

    // A hidden wizard with a draft in progress
    if !app.wizard.is_open() && (!app.wizard.total().is_zero() || !app.wizard.step().is_first()) {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("Draft: {}", app.wizard.step()),
            Style::default().fg(Color::Magenta),
        ));
    }

    if let Some(message) = &app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = if app.has_dialog() {
        " Esc:Close wizard "
    } else {
        " q:Quit  Tab:Focus  Enter:Filter  s:Sort  c:Column  t:Today  x:Expense "
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
