//! HTTP client for the registration API
//!
//! Fetches reference option lists and posts participation requests as JSON.

use super::{ApiError, RegistrationApi};
use crate::state::{ReferenceOption, Resource, SubmissionPayload};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

/// Endpoint URLs derived from the configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// Always ends with `/`
    base_url: String,
}

impl ApiEndpoints {
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim();
        let base_url = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>api/<resource>/`
    pub fn options(&self, resource: Resource) -> String {
        format!("{}api/{}/", self.base_url, resource.path())
    }

    /// `<base>api/participation-requests/`
    pub fn participation_requests(&self) -> String {
        format!("{}api/participation-requests/", self.base_url)
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pull the `message` field out of an error response body.
/// Returns None for empty, non-JSON, or message-less bodies.
pub fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// Client for the registration API
pub struct HttpApiClient {
    http_client: reqwest::Client,
    endpoints: ApiEndpoints,
}

impl HttpApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoints: ApiEndpoints::new(base_url),
        }
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Turn a non-success response into [`ApiError::Rejected`]
    async fn rejection(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("API error: HTTP {} - {}", status, body);
        ApiError::Rejected {
            status: status.as_u16(),
            message: extract_error_message(&body),
        }
    }
}

#[async_trait]
impl RegistrationApi for HttpApiClient {
    async fn list_options(&self, resource: Resource) -> Result<Vec<ReferenceOption>, ApiError> {
        let url = self.endpoints.options(resource);

        tracing::debug!("Fetching {} from {}", resource, url);

        let response = self
            .http_client
            .get(&url)
            .header(ACCEPT, "*/*")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch {}: {}", resource, e);
                ApiError::from(e)
            })?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body = response.text().await?;
        let options = serde_json::from_str::<Vec<ReferenceOption>>(&body).map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", resource, e);
            ApiError::Decode(e.to_string())
        })?;

        Ok(options)
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), ApiError> {
        let url = self.endpoints.participation_requests();

        tracing::debug!("Submitting participation request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(ACCEPT, "*/*")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to submit participation request: {}", e);
                ApiError::from(e)
            })?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        tracing::info!("Participation request accepted: HTTP {}", response.status());

        Ok(())
    }
}
