//! Trip dashboard view
//!
//! Date filter bar and the filtered trip table.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::trip::NO_TRIPS_NOTICE;
use crate::tui::app::{App, Focus};

/// Render the from/to inputs and the current view settings
pub fn render_filter(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = matches!(app.focus, Focus::From | Focus::To);
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" Date filter ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut inputs = app.from_input.line("From", app.focus == Focus::From);
    inputs
        .spans
        .extend(app.to_input.line("To", app.focus == Focus::To).spans);

    let settings = Line::from(vec![
        Span::styled("Sort: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("start date {}", app.view.order),
            Style::default().fg(Color::White),
        ),
        Span::styled("   Column: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.view.detail.header(), Style::default().fg(Color::White)),
    ]);

    frame.render_widget(Paragraph::new(vec![inputs, settings]).block(block), area);
}

/// Render the trip table
pub fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focus == Focus::Trips;
    let border_color = if is_focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(format!(" Trips overlapping {} ", app.selection_label()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if app.trips.is_empty() {
        let text = Paragraph::new(NO_TRIPS_NOTICE)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(5),  // ID
        Constraint::Min(16),    // Destination
        Constraint::Length(12), // Start
        Constraint::Length(12), // End
        Constraint::Min(14),    // Detail
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("ID").style(bold),
        Cell::from("Destination").style(bold),
        Cell::from("Start").style(bold),
        Cell::from("End").style(bold),
        Cell::from(app.view.detail.header()).style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let date_format = app.settings.date_format.as_str();
    let rows: Vec<Row> = app
        .trips
        .iter()
        .map(|trip| {
            Row::new(vec![
                Cell::from(trip.id.to_string()),
                Cell::from(trip.destination.clone()),
                Cell::from(trip.start_date.format(date_format).to_string()),
                Cell::from(trip.end_date.format(date_format).to_string()),
                Cell::from(app.view.detail.value(trip)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if is_focused {
        state.select(Some(app.selected_trip_index));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
