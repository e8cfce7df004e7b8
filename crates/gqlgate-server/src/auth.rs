//! Inbound basic authentication.
//!
//! The decoded `Authorization: Basic` payload must equal the configured
//! credential exactly. A missing or undecodable header counts as a mismatch.

use axum::http::{HeaderMap, header};
use base64::Engine;
use gqlgate_core::AuthConfig;

use crate::error::GatewayError;

#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<(), GatewayError> {
        match decode_basic(headers) {
            Some(presented) if self.config.matches(&presented) => Ok(()),
            _ => Err(GatewayError::AuthMismatch),
        }
    }
}

/// Decoded `user:password` from a basic `Authorization` header.
pub fn decode_basic(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    String::from_utf8(decoded).ok()
}
