//! Application state module

mod forms;
mod notifications;
mod reference;

pub use forms::*;
pub use notifications::*;
pub use reference::*;
