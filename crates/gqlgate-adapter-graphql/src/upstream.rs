//! The seam between request orchestration and the upstream platform.

use async_trait::async_trait;
use gqlgate_core::{AuthorizedResource, ListQuery, ResourceSchema, UpstreamConfig};
use serde_json::Value;

use crate::client::GraphQlClient;
use crate::error::UpstreamError;
use crate::session::SessionToken;
use crate::{fetch, introspect, session};

/// The three upstream calls a request makes.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Obtain a session token using the configured login credentials.
    async fn login(&self) -> Result<SessionToken, UpstreamError>;

    /// Introspect the field layout of an allow-listed resource.
    async fn describe(
        &self,
        resource: &AuthorizedResource,
        token: &SessionToken,
    ) -> Result<ResourceSchema, UpstreamError>;

    /// Execute a synthesized list query and return the raw items.
    async fn fetch_items(
        &self,
        query: &ListQuery,
        token: &SessionToken,
    ) -> Result<Vec<Value>, UpstreamError>;
}

/// [`Upstream`] backed by a live GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlUpstream {
    client: GraphQlClient,
    login_payload: Value,
}

impl GraphQlUpstream {
    pub fn new(client: GraphQlClient, login_payload: Value) -> Self {
        Self {
            client,
            login_payload,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Ok(Self::new(
            GraphQlClient::from_config(config)?,
            config.login.clone(),
        ))
    }
}

#[async_trait]
impl Upstream for GraphQlUpstream {
    async fn login(&self) -> Result<SessionToken, UpstreamError> {
        session::login(&self.client, &self.login_payload).await
    }

    async fn describe(
        &self,
        resource: &AuthorizedResource,
        token: &SessionToken,
    ) -> Result<ResourceSchema, UpstreamError> {
        introspect::describe(&self.client, resource, token).await
    }

    async fn fetch_items(
        &self,
        query: &ListQuery,
        token: &SessionToken,
    ) -> Result<Vec<Value>, UpstreamError> {
        fetch::fetch_items(&self.client, query, token).await
    }
}
