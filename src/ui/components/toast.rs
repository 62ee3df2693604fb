//! Toast notification overlay

use crate::state::{Notification, NotificationKind, NotificationQueue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Maximum width of a single toast
const TOAST_MAX_WIDTH: u16 = 48;

fn kind_style(kind: NotificationKind) -> (&'static str, Color) {
    match kind {
        NotificationKind::Success => ("✓", Color::Green),
        NotificationKind::Error => ("✗", Color::Red),
        NotificationKind::Info => ("i", Color::Cyan),
    }
}

/// Render queued toasts stacked down the top-right corner, newest first
pub fn render_toasts(frame: &mut Frame, area: Rect, notifications: &NotificationQueue) {
    if notifications.is_empty() {
        return;
    }
    let mut y = area.y;
    let bottom = area.y + area.height;

    for notification in notifications.iter().collect::<Vec<_>>().into_iter().rev() {
        let width = TOAST_MAX_WIDTH.min(area.width);
        if width < 8 {
            return;
        }
        let lines = wrap_text(&notification.message, (width - 6) as usize);
        let height = lines.len() as u16 + 2;
        if y + height > bottom {
            return;
        }

        let toast_area = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height,
        };
        render_toast(frame, toast_area, notification, lines);
        y += height;
    }
}

fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification, lines: Vec<String>) {
    let (icon, color) = kind_style(notification.kind);

    frame.render_widget(Clear, area);

    let content: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 {
                Span::styled(
                    format!("{icon} "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            Line::from(vec![prefix, Span::raw(line)])
        })
        .collect();

    let toast = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(toast, area);
}

/// Wrap text to fit within a maximum width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_len = current_line.chars().count();
            if current_len + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
