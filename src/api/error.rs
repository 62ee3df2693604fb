//! Errors returned by the registration API client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status
    #[error("API returned HTTP {status}")]
    Rejected {
        status: u16,
        /// `message` field of the response body, when present
        message: Option<String>,
    },

    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not what the endpoint promises
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
