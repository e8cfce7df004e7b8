//! Inbound authentication configuration.

use serde::{Deserialize, Serialize};

/// The single credential inbound requests must present.
///
/// `valid_auth` is the decoded basic-auth payload, i.e. `user:password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub valid_auth: String,
}

impl AuthConfig {
    pub fn new(valid_auth: impl Into<String>) -> Self {
        Self {
            valid_auth: valid_auth.into(),
        }
    }

    /// Check a decoded credential against the configured one.
    pub fn matches(&self, presented: &str) -> bool {
        !self.valid_auth.is_empty() && presented == self.valid_auth
    }
}
