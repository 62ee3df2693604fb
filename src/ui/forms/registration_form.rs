//! Registration form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::registration::RegistrationSession;
use crate::state::{Form, FormField, Resource};
use crate::ui::components::{render_submit_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Width of the submit button
const SUBMIT_WIDTH: u16 = 20;

/// Draw the form for the mounted variant
pub fn draw_registration_form(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let form = &session.form;

    let block = Block::default()
        .title(format!(" {} Registration ", form.variant.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Fields
            Constraint::Length(BUTTON_HEIGHT), // Submit
        ])
        .margin(1)
        .split(inner);

    draw_fields(frame, chunks[0], session);

    let [button_area] = Layout::horizontal([Constraint::Length(SUBMIT_WIDTH)])
        .flex(Flex::Center)
        .areas(chunks[1]);
    render_submit_button(
        frame,
        button_area,
        form.is_submit_row_active(),
        session.is_submitting(),
    );
}

/// Lay the fields out in two columns, filling the left one first
fn draw_fields(frame: &mut Frame, area: Rect, session: &RegistrationSession) {
    let form = &session.form;
    let per_column = form.fields.len().div_ceil(2);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .spacing(1)
        .split(area);

    for (column, column_area) in columns.iter().enumerate() {
        let start = column * per_column;
        let end = (start + per_column).min(form.fields.len());
        if start >= end {
            continue;
        }

        let mut constraints = vec![Constraint::Length(FIELD_HEIGHT); end - start];
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(*column_area);

        for index in start..end {
            let Some(field) = form.get_field(index) else {
                continue;
            };
            draw_field(
                frame,
                rows[index - start],
                field,
                form.active_field() == index,
                placeholder(session, field),
                form.error_for(field.name),
            );
        }
    }
}

/// What an empty field shows in place of a value
fn placeholder(session: &RegistrationSession, field: &FormField) -> &'static str {
    if !field.is_choice() {
        return "(empty)";
    }
    match Resource::for_field(field.name) {
        Some(resource) if session.is_pending(resource) => "Loading...",
        _ if field.options().is_empty() => "No options available",
        _ => "",
    }
}
