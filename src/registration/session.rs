//! One mounted registration form and its background work

use super::loader::{load_failed_message, spawn_option_loads, LoadHandle};
use super::submitter::{
    spawn_submission, SubmissionPhase, GENERIC_ERROR_MESSAGE, GENERIC_REJECTION_MESSAGE,
    SUBMISSION_IN_PROGRESS_MESSAGE, SUCCESS_MESSAGE,
};
use super::WorkflowEvent;
use crate::api::{ApiError, RegistrationApi};
use crate::state::{
    FormVariant, NotificationQueue, RegistrationForm, Resource, SubmissionPayload,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// What happened when the user asked to submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Request sent; the outcome arrives as an event
    Started,
    /// Validation failed; inline errors are on the form
    Invalid { errors: usize },
    /// A previous submission has not settled yet
    AlreadySubmitting,
    /// Values passed validation but could not be shaped into a payload
    Malformed,
}

/// Owns the form for the current variant, its option loads, and the
/// submission in flight. Must be created inside a tokio runtime.
pub struct RegistrationSession {
    api: Arc<dyn RegistrationApi>,
    pub form: RegistrationForm,
    pub notifications: NotificationQueue,
    phase: SubmissionPhase,
    /// Bumped on every mount so late results from an earlier mount are ignored
    generation: u64,
    loader: Option<LoadHandle>,
    pending_loads: HashSet<Resource>,
    submission: Option<JoinHandle<()>>,
    events_tx: UnboundedSender<WorkflowEvent>,
    events_rx: UnboundedReceiver<WorkflowEvent>,
}

impl RegistrationSession {
    /// Create a session with nothing mounted yet
    pub fn new(api: Arc<dyn RegistrationApi>, variant: FormVariant, toast_ttl: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            form: RegistrationForm::new(variant),
            notifications: NotificationQueue::new(toast_ttl),
            phase: SubmissionPhase::Idle,
            generation: 0,
            loader: None,
            pending_loads: HashSet::new(),
            submission: None,
            events_tx,
            events_rx,
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.form.variant
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn is_loading(&self) -> bool {
        !self.pending_loads.is_empty()
    }

    pub fn is_pending(&self, resource: Resource) -> bool {
        self.pending_loads.contains(&resource)
    }

    /// Show a fresh form for `variant` and start loading its reference lists.
    /// Loads still running for the previous form are aborted.
    pub fn mount(&mut self, variant: FormVariant) {
        self.unmount();
        self.generation += 1;
        self.form = RegistrationForm::new(variant);

        let resources = variant.resources();
        tracing::debug!(
            "Mounting {} form (generation {}), loading {:?}",
            variant.title(),
            self.generation,
            resources
        );
        self.pending_loads = resources.iter().copied().collect();
        self.loader = Some(spawn_option_loads(
            Arc::clone(&self.api),
            &resources,
            self.generation,
            self.events_tx.clone(),
        ));
    }

    /// Abort outstanding option loads. A submission in flight still reports back.
    pub fn unmount(&mut self) {
        self.loader = None;
        self.pending_loads.clear();
    }

    /// Validate and, if valid, send the form
    pub fn submit(&mut self) -> SubmitAttempt {
        if self.is_submitting() {
            self.notifications.info(SUBMISSION_IN_PROGRESS_MESSAGE);
            return SubmitAttempt::AlreadySubmitting;
        }

        if !self.form.validate() {
            tracing::debug!("Submission blocked by {} invalid fields", self.form.errors.len());
            return SubmitAttempt::Invalid {
                errors: self.form.errors.len(),
            };
        }

        let payload = match SubmissionPayload::build(self.form.variant, &self.form.values()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to build submission payload: {}", e);
                self.notifications.error(GENERIC_ERROR_MESSAGE);
                return SubmitAttempt::Malformed;
            }
        };

        self.phase = SubmissionPhase::Submitting;
        self.submission = Some(spawn_submission(
            Arc::clone(&self.api),
            payload,
            self.generation,
            self.events_tx.clone(),
        ));
        SubmitAttempt::Started
    }

    /// Apply every result that has arrived since the last call
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait until no option load or submission is outstanding
    #[cfg(test)]
    pub async fn settle(&mut self) {
        while self.is_loading() || self.is_submitting() {
            match self.events_rx.recv().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    fn apply(&mut self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::OptionsLoaded {
                generation,
                resource,
                result,
            } => {
                if generation != self.generation {
                    tracing::debug!("Ignoring {} loaded for generation {}", resource, generation);
                    return;
                }
                self.pending_loads.remove(&resource);
                match result {
                    Ok(options) => {
                        tracing::info!("Loaded {} {}", options.len(), resource);
                        self.form.set_options(resource, &options);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", resource, e);
                        self.notifications.error(load_failed_message(resource));
                    }
                }
            }
            WorkflowEvent::SubmissionFinished { generation, result } => {
                self.phase = SubmissionPhase::Idle;
                self.submission = None;
                match result {
                    Ok(()) => {
                        self.notifications.success(SUCCESS_MESSAGE);
                        if generation == self.generation {
                            self.form.reset();
                        }
                    }
                    Err(ApiError::Rejected { status, message }) => {
                        tracing::warn!("Submission rejected with HTTP {}", status);
                        self.notifications.error(
                            message.unwrap_or_else(|| GENERIC_REJECTION_MESSAGE.to_string()),
                        );
                    }
                    Err(e) => {
                        tracing::error!("Submission failed: {}", e);
                        self.notifications.error(GENERIC_ERROR_MESSAGE);
                    }
                }
            }
        }
    }
}

impl Drop for RegistrationSession {
    fn drop(&mut self) {
        if let Some(submission) = self.submission.take() {
            submission.abort();
        }
    }
}
