//! Layout components (header, status bar)

use super::components::{render_tab_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::FormVariant;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of each form tab
const TAB_WIDTH: u16 = 20;

/// Split the screen into header, content, and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Header with form tabs
            Constraint::Min(0),                // Form
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the app title and one tab per form variant
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = " Olympiad Registration ";

    let mut constraints = vec![Constraint::Length(title.len() as u16 + 2)];
    constraints.extend(FormVariant::ALL.iter().map(|_| Constraint::Length(TAB_WIDTH)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let title_area = Rect {
        y: chunks[0].y + 1,
        height: 1,
        ..chunks[0]
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        title_area,
    );

    let current = app.session.variant();
    for variant in FormVariant::ALL.iter() {
        let idx = variant.index();
        render_tab_button(
            frame,
            chunks[idx + 1],
            &format!("F{}", idx + 1),
            variant.title(),
            *variant == current,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Background work indicator
    let activity = if app.session.is_submitting() {
        Span::styled(" ⟳ ", Style::default().fg(Color::Yellow))
    } else if app.session.is_loading() {
        Span::styled(" … ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };
    spans.push(activity);

    spans.push(Span::styled(HINTS, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // API base URL on the right
    let url_hint = format!(" {} ", app.api_base_url);
    let url_width = url_hint.chars().count() as u16;
    if url_width < area.width / 2 {
        let url_area = Rect {
            x: area.x + area.width - url_width,
            width: url_width,
            ..area
        };
        let url_widget =
            Paragraph::new(url_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Blue));
        frame.render_widget(url_widget, url_area);
    }
}

/// Keyboard hints for the form
const HINTS: &str =
    "Tab:next  ←/→:choose  Enter:submit  ^S:submit  Esc:clear  F1-F3:form  ^C^C:quit";
