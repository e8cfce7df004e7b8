//! Minimal GraphQL-over-HTTP transport.
//!
//! Sends `{query, variables}` as a JSON POST and unwraps the standard
//! `{data, errors}` envelope. Any entry in `errors` fails the call.

use std::time::Duration;

use gqlgate_core::UpstreamConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::session::SessionToken;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub struct GraphQlClient {
    endpoint: String,
    http: reqwest::Client,
}

impl GraphQlClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(UpstreamError::Http)?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Self::new(config.api_url.clone(), config.timeout())
    }

    /// Run one GraphQL operation and return its `data` member.
    pub async fn execute(
        &self,
        query: &str,
        variables: Value,
        bearer: Option<&SessionToken>,
    ) -> Result<Value, UpstreamError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables });

        if let Some(token) = bearer {
            request = request.bearer_auth(token.expose());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::BadStatus(status));
        }

        let body = response.json::<GraphQlResponse>().await.map_err(|e| {
            if e.is_decode() {
                UpstreamError::MalformedResponse(format!("invalid GraphQL envelope: {e}"))
            } else {
                UpstreamError::from(e)
            }
        })?;

        into_data(body)
    }
}

fn into_data(body: GraphQlResponse) -> Result<Value, UpstreamError> {
    if !body.errors.is_empty() {
        return Err(UpstreamError::GraphQl(
            body.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    body.data
        .filter(|data| !data.is_null())
        .ok_or_else(|| UpstreamError::MalformedResponse("response has no data".to_string()))
}
