//! Shared application state.

use std::sync::Arc;

use gqlgate_adapter_graphql::{Upstream, UpstreamError, connect};
use gqlgate_core::{GatewayConfig, Normalizer, ResourceAuthorizer};

use crate::auth::Authenticator;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: GatewayConfig,
    authenticator: Authenticator,
    authorizer: ResourceAuthorizer,
    normalizer: Normalizer,
    upstream: Arc<dyn Upstream>,
}

impl AppState {
    /// Create state around an existing upstream.
    pub fn new(config: GatewayConfig, upstream: Arc<dyn Upstream>) -> Self {
        let authenticator = Authenticator::new(config.auth.clone());
        let authorizer = ResourceAuthorizer::from_config(&config);
        let normalizer = Normalizer::new(config.normalize);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                authenticator,
                authorizer,
                normalizer,
                upstream,
            }),
        }
    }

    /// Create state with the live GraphQL upstream described by `config`.
    pub fn from_config(config: GatewayConfig) -> Result<Self, UpstreamError> {
        let upstream = connect(&config.upstream)?;
        Ok(Self::new(config, upstream))
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.inner.authenticator
    }

    pub fn authorizer(&self) -> &ResourceAuthorizer {
        &self.inner.authorizer
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.inner.normalizer
    }

    pub fn upstream(&self) -> &dyn Upstream {
        self.inner.upstream.as_ref()
    }
}
