//! Error types for the upstream adapter.

use thiserror::Error;

/// Failures talking to the upstream GraphQL platform.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The configured timeout elapsed.
    #[error("upstream request timed out")]
    Timeout,

    /// Transport-level failure.
    #[error("upstream HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("upstream returned status {0}")]
    BadStatus(reqwest::StatusCode),

    /// The GraphQL envelope carried errors.
    #[error("upstream GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response did not have the expected shape.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Http(value)
        }
    }
}
