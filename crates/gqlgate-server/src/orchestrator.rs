//! Request pipeline.
//!
//! A request moves through
//! `Unauthenticated -> TokenAcquired -> ResourceValidated -> SchemaFetched -> Executed -> Responded`
//! and any stage may end in `Failed`. Stages run strictly in order, each
//! awaiting the previous one; nothing is retried.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use gqlgate_core::{Record, build_filter, build_list_query, build_projection};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unauthenticated,
    TokenAcquired,
    ResourceValidated,
    SchemaFetched,
    Executed,
    Responded,
    Failed(&'static str),
}

/// Query string of a data request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
}

/// Body of the discovery response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceList {
    pub resources: Vec<String>,
}

/// Successful result of a request.
#[derive(Debug)]
pub enum Outcome {
    /// No resource was named; list what can be asked for.
    Resources(ResourceList),
    /// Normalized records for the requested resource.
    Records(Vec<Record>),
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Resources(list) => Json(list).into_response(),
            Outcome::Records(records) => Json(records).into_response(),
        }
    }
}

pub struct Orchestrator<'a> {
    state: &'a AppState,
    stage: Stage,
}

impl<'a> Orchestrator<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            stage: Stage::Unauthenticated,
        }
    }

    /// Run the pipeline and turn the result into exactly one response.
    /// `params` is the decoded query string, or why it could not be decoded.
    /// A bad query string is reported only after authentication.
    pub async fn respond(
        mut self,
        headers: &HeaderMap,
        params: Result<ResourceQuery, QueryRejection>,
    ) -> Response {
        match self.run(headers, params).await {
            Ok(outcome) => outcome.into_response(),
            Err(err) => {
                self.fail(&err);
                err.into_response_with(self.state.config().client_error_status)
            }
        }
    }

    pub async fn run(
        &mut self,
        headers: &HeaderMap,
        params: Result<ResourceQuery, QueryRejection>,
    ) -> Result<Outcome, GatewayError> {
        self.state.authenticator().authenticate(headers)?;

        let upstream = self.state.upstream();
        let token = upstream.login().await.map_err(GatewayError::Login)?;
        self.advance(Stage::TokenAcquired);

        let params = params.map_err(|rejection| GatewayError::MalformedQuery {
            detail: rejection.body_text(),
        })?;

        let Some(name) = params.resource.as_deref().filter(|r| !r.is_empty()) else {
            self.advance(Stage::Responded);
            return Ok(Outcome::Resources(ResourceList {
                resources: self.state.authorizer().resources().to_vec(),
            }));
        };

        let resource = self.state.authorizer().authorize(name)?;
        let filter = build_filter(params.since.as_deref())?;
        self.advance(Stage::ResourceValidated);

        let schema = upstream
            .describe(&resource, &token)
            .await
            .map_err(GatewayError::Fetch)?;
        self.advance(Stage::SchemaFetched);

        let projection = build_projection(&schema);
        let query = build_list_query(&resource, &projection, filter.as_ref());
        tracing::debug!(query = %query.text, "synthesized list query");

        let items = upstream
            .fetch_items(&query, &token)
            .await
            .map_err(GatewayError::Fetch)?;
        self.advance(Stage::Executed);

        let records = self.state.normalizer().normalize(&items);
        tracing::info!(resource = %resource, records = records.len(), "request served");
        self.advance(Stage::Responded);

        Ok(Outcome::Records(records))
    }

    fn advance(&mut self, next: Stage) {
        tracing::debug!(from = ?self.stage, to = ?next, "stage complete");
        self.stage = next;
    }

    fn fail(&mut self, err: &GatewayError) {
        match err {
            GatewayError::Login(_) | GatewayError::Fetch(_) => {
                tracing::error!(stage = ?self.stage, error = %err, "request failed");
            }
            _ => {
                tracing::warn!(stage = ?self.stage, error = %err, "request rejected");
            }
        }
        self.stage = Stage::Failed(err.kind());
    }
}
