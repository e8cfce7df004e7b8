//! Configuration types for gqlgate.
//!
//! The whole configuration is read once at process start (the binary fills it
//! from flags and environment variables) and is never mutated afterwards.
//! Components receive it by reference or behind an `Arc`; nothing reads the
//! process environment at request time.

pub mod auth;
pub mod upstream;

use serde::{Deserialize, Serialize};

use crate::authorizer::is_graphql_name;
use crate::normalize::FalsyPolicy;

pub use auth::AuthConfig;
pub use upstream::UpstreamConfig;

/// Complete gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Inbound basic-auth credential.
    pub auth: AuthConfig,

    /// Upstream GraphQL platform.
    pub upstream: UpstreamConfig,

    /// Resource names callers may read.
    #[serde(default = "default_resources")]
    pub resources: Vec<String>,

    /// How falsy field values are treated during normalization.
    #[serde(default)]
    pub normalize: FalsyPolicy,

    /// Answer unknown resources with 404 and bad dates with 400 instead of 500.
    #[serde(default)]
    pub client_error_status: bool,
}

impl GatewayConfig {
    /// Create a configuration with the default allow-list and policies.
    pub fn new(auth: AuthConfig, upstream: UpstreamConfig) -> Self {
        Self {
            auth,
            upstream,
            resources: default_resources(),
            normalize: FalsyPolicy::default(),
            client_error_status: false,
        }
    }

    /// Parse configuration from JSON content.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the request pipeline relies on.
    ///
    /// Allow-listed names are interpolated into query text, so each one must
    /// be a plain GraphQL name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.valid_auth.is_empty() {
            return Err(ConfigError::Config(
                "inbound credential must not be empty".to_string(),
            ));
        }

        if self.resources.is_empty() {
            return Err(ConfigError::Config(
                "resource allow-list must not be empty".to_string(),
            ));
        }

        if let Some(bad) = self.resources.iter().find(|r| !is_graphql_name(r)) {
            return Err(ConfigError::Config(format!(
                "resource {bad:?} is not a valid GraphQL name"
            )));
        }

        self.upstream.validate()
    }
}

fn default_resources() -> Vec<String> {
    vec!["contact".to_string()]
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
