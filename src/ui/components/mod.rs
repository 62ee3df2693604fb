//! Reusable UI components

mod button;
mod toast;

pub use button::{render_submit_button, render_tab_button, BUTTON_HEIGHT};
pub use toast::render_toasts;
