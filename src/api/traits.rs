//! Trait abstraction for the registration API to enable mocking in tests

use super::ApiError;
use crate::state::{ReferenceOption, Resource, SubmissionPayload};
use async_trait::async_trait;

/// Operations the registration form needs from the remote API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Fetch one reference list, e.g. countries
    async fn list_options(&self, resource: Resource) -> Result<Vec<ReferenceOption>, ApiError>;

    /// Submit a participation request
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), ApiError>;
}
