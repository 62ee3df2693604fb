//! Registration workflow
//!
//! Loads reference lists when a form is shown, gates submission on
//! validation, and turns API outcomes into notifications.

mod loader;
mod session;
mod submitter;

use crate::api::ApiError;
use crate::state::{ReferenceOption, Resource};

pub use session::{RegistrationSession, SubmitAttempt};
pub use submitter::SubmissionPhase;

/// Results delivered from background tasks to the session.
///
/// `generation` identifies the form mount that started the task.
#[derive(Debug)]
pub enum WorkflowEvent {
    OptionsLoaded {
        generation: u64,
        resource: Resource,
        result: Result<Vec<ReferenceOption>, ApiError>,
    },
    SubmissionFinished {
        generation: u64,
        result: Result<(), ApiError>,
    },
}
