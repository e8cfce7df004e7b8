//! Error types for the gateway server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gqlgate_adapter_graphql::UpstreamError;
use gqlgate_core::CoreError;
use std::net::SocketAddr;
use thiserror::Error;

pub const AUTH_FAILED_MESSAGE: &str = "Incorrect authentication.";
pub const INVALID_RESOURCE_MESSAGE: &str = "Invalid resource.";
pub const INVALID_DATE_MESSAGE: &str = "Invalid date provided.";
pub const PROCESSING_FAILED_MESSAGE: &str = "An error occurred processing your request.";
pub const FETCH_FAILED_MESSAGE: &str = "An error occurred fetching data from upstream.";

/// Terminal failure of one request.
///
/// Only the fixed public message reaches the caller; upstream detail is
/// logged and dropped.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing, malformed or wrong basic credential.
    #[error("authentication failed")]
    AuthMismatch,

    /// Resource not on the allow-list.
    #[error("unknown resource {name:?}")]
    UnknownResource { name: String },

    /// The query string could not be decoded, e.g. a repeated `resource`.
    #[error("malformed query string: {detail}")]
    MalformedQuery { detail: String },

    /// `since` could not be parsed.
    #[error("invalid date {raw:?}")]
    InvalidDate { raw: String },

    /// Upstream login failed.
    #[error("upstream login failed: {0}")]
    Login(#[source] UpstreamError),

    /// Introspection or list fetch failed.
    #[error("upstream fetch failed: {0}")]
    Fetch(#[source] UpstreamError),
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownResource { name } => GatewayError::UnknownResource { name },
            CoreError::InvalidDate { raw } => GatewayError::InvalidDate { raw },
        }
    }
}

impl GatewayError {
    /// Short name used in logs and in the `Failed` stage.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::AuthMismatch => "auth_mismatch",
            GatewayError::UnknownResource { .. } => "unknown_resource",
            GatewayError::MalformedQuery { .. } => "malformed_query",
            GatewayError::InvalidDate { .. } => "invalid_date",
            GatewayError::Login(_) => "upstream_login",
            GatewayError::Fetch(_) => "upstream_fetch",
        }
    }

    /// Validation failures answer 500 unless `client_error_status` is set.
    pub fn status(&self, client_error_status: bool) -> StatusCode {
        match self {
            GatewayError::AuthMismatch => StatusCode::UNAUTHORIZED,
            GatewayError::UnknownResource { .. } if client_error_status => StatusCode::NOT_FOUND,
            GatewayError::MalformedQuery { .. } | GatewayError::InvalidDate { .. }
                if client_error_status =>
            {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::AuthMismatch => AUTH_FAILED_MESSAGE,
            GatewayError::UnknownResource { .. } | GatewayError::MalformedQuery { .. } => {
                INVALID_RESOURCE_MESSAGE
            }
            GatewayError::InvalidDate { .. } => INVALID_DATE_MESSAGE,
            GatewayError::Login(_) => PROCESSING_FAILED_MESSAGE,
            GatewayError::Fetch(_) => FETCH_FAILED_MESSAGE,
        }
    }

    pub fn into_response_with(self, client_error_status: bool) -> Response {
        (self.status(client_error_status), self.public_message()).into_response()
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}

/// Errors that stop the gateway from binding or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
