//! Upstream platform configuration.
//!
//! The upstream is a GraphQL endpoint. Login happens through a `userLogin`
//! mutation whose input object is taken verbatim from `login` and sent as a
//! GraphQL variable, so credentials never become part of the query text.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;

/// Configuration for the upstream GraphQL platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// GraphQL endpoint URL.
    pub api_url: String,

    /// Input object for the login mutation (e.g. `{"email": ..., "password": ...}`).
    pub login: serde_json::Value,

    /// Per-call timeout in seconds. Unset means calls may wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// How long session tokens and resource schemas may be reused.
    /// Zero disables caching: every request logs in and introspects again.
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

impl UpstreamConfig {
    pub fn new(api_url: impl Into<String>, login: serde_json::Value) -> Self {
        Self {
            api_url: api_url.into(),
            login,
            timeout_secs: None,
            cache_ttl_secs: 0,
        }
    }

    /// Configured per-call timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Cache lifetime; `Duration::ZERO` when caching is off.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Config("upstream api_url is empty".to_string()));
        }

        if !self.login.is_object() {
            return Err(ConfigError::Config(
                "upstream login payload must be a JSON object".to_string(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Config(
                "upstream timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}
