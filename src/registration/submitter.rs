//! Participation request submission

use super::WorkflowEvent;
use crate::api::RegistrationApi;
use crate::state::SubmissionPayload;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub const SUCCESS_MESSAGE: &str = "Registration submitted successfully!";
/// Shown when the API rejects a request without a usable `message`
pub const GENERIC_REJECTION_MESSAGE: &str = "Failed to submit registration. Please try again.";
/// Shown when the request fails before the API answers
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while submitting the form.";
pub const SUBMISSION_IN_PROGRESS_MESSAGE: &str = "Submission already in progress";

/// Where the current submit attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
}

/// POST `payload` in the background and report back through `events`
pub fn spawn_submission(
    api: Arc<dyn RegistrationApi>,
    payload: SubmissionPayload,
    generation: u64,
    events: UnboundedSender<WorkflowEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = api.submit(&payload).await;
        let _ = events.send(WorkflowEvent::SubmissionFinished { generation, result });
    })
}
