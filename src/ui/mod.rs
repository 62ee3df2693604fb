//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);
    forms::draw_registration_form(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Toasts float over the form
    components::render_toasts(frame, main_area, &app.session.notifications);
}
