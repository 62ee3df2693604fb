//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Color,
) {
    let border_style = if is_selected {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a form tab with its function key and title
pub fn render_tab_button(frame: &mut Frame, area: Rect, key: &str, label: &str, is_selected: bool) {
    let content = format!("{key} {label}");
    render_button(frame, area, &content, is_selected, true, Color::Cyan);
}

/// Render the form's submit button. Disabled while a request is in flight.
pub fn render_submit_button(frame: &mut Frame, area: Rect, is_selected: bool, is_submitting: bool) {
    let content = if is_submitting {
        "Submitting..."
    } else {
        "Submit"
    };
    render_button(
        frame,
        area,
        content,
        is_selected,
        !is_submitting,
        Color::Green,
    );
}
