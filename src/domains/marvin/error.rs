//! Remote API error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while calling the Marvin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot be used.
    #[error("Invalid Marvin API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request could not be completed (connect, TLS, body read...).
    #[error("Request to Marvin API failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status. `body` is passed through
    /// as received.
    #[error("Marvin API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl ApiError {
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
