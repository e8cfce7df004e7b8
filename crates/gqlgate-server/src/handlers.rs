//! Request handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde_json::{Value, json};
use tracing::Instrument;
use uuid::Uuid;

use crate::orchestrator::{Orchestrator, ResourceQuery};
use crate::state::AppState;

/// `GET /?resource=..&since=..`
pub async fn query_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ResourceQuery>, QueryRejection>,
) -> Response {
    let params = query.map(|Query(params)| params);
    let resource = params
        .as_ref()
        .ok()
        .and_then(|p| p.resource.clone())
        .unwrap_or_default();
    let span = tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        resource = %resource,
    );

    async move { Orchestrator::new(&state).respond(&headers, params).await }
        .instrument(span)
        .await
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true, "service": "gqlgate" }))
}
