//! Shared fixtures for the e2e tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use gqlgate_adapter_graphql::{SessionToken, Upstream, UpstreamError};
use gqlgate_core::{
    AuthConfig, AuthorizedResource, FieldDescriptor, GatewayConfig, ListQuery, ResourceSchema,
    UpstreamConfig,
};
use gqlgate_server::{AppState, create_router};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const CREDENTIAL: &str = "report:s3cret";
pub const TOKEN: &str = "tok-e2e";

/// One call the gateway made against the fake upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login,
    Describe { resource: String, token: String },
    Fetch { query: String, token: String },
}

/// Which upstream call should fail, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailAt {
    #[default]
    Nothing,
    Login,
    Describe,
    Fetch,
}

/// Scripted upstream that records every call.
#[derive(Default)]
pub struct FakeUpstream {
    fields: Vec<FieldDescriptor>,
    items: Vec<Value>,
    fail_at: FailAt,
    calls: Mutex<Vec<Call>>,
}

impl FakeUpstream {
    pub fn new(fields: Vec<FieldDescriptor>, items: Vec<Value>) -> Self {
        Self {
            fields,
            items,
            ..Self::default()
        }
    }

    pub fn failing_at(mut self, fail_at: FailAt) -> Self {
        self.fail_at = fail_at;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn describe_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Describe { .. }))
            .count()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Fetch { .. }))
            .count()
    }

    pub fn fetched_query(&self) -> Option<String> {
        self.calls().into_iter().find_map(|c| match c {
            Call::Fetch { query, .. } => Some(query),
            _ => None,
        })
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn upstream_error(&self) -> UpstreamError {
        UpstreamError::GraphQl(vec!["Field \"secret_column\" is not defined".to_string()])
    }
}

#[async_trait]
impl Upstream for FakeUpstream {
    async fn login(&self) -> Result<SessionToken, UpstreamError> {
        self.record(Call::Login);
        if self.fail_at == FailAt::Login {
            return Err(self.upstream_error());
        }
        Ok(SessionToken::new(TOKEN))
    }

    async fn describe(
        &self,
        resource: &AuthorizedResource,
        token: &SessionToken,
    ) -> Result<ResourceSchema, UpstreamError> {
        self.record(Call::Describe {
            resource: resource.as_str().to_string(),
            token: token.expose().to_string(),
        });
        if self.fail_at == FailAt::Describe {
            return Err(self.upstream_error());
        }
        Ok(ResourceSchema::new(resource.as_str(), self.fields.clone()))
    }

    async fn fetch_items(
        &self,
        query: &ListQuery,
        token: &SessionToken,
    ) -> Result<Vec<Value>, UpstreamError> {
        self.record(Call::Fetch {
            query: query.text.clone(),
            token: token.expose().to_string(),
        });
        if self.fail_at == FailAt::Fetch {
            return Err(self.upstream_error());
        }
        Ok(self.items.clone())
    }
}

/// Schema and item used by the contact scenarios.
pub fn contact_upstream() -> FakeUpstream {
    FakeUpstream::new(
        vec![
            FieldDescriptor::scalar("email"),
            FieldDescriptor::file("avatar"),
            FieldDescriptor::relation("company", false),
        ],
        vec![json!({
            "email": "a@b.com",
            "avatar": { "id": "f1" },
            "company": { "id": "c1" }
        })],
    )
}

pub fn config() -> GatewayConfig {
    GatewayConfig::new(
        AuthConfig::new(CREDENTIAL),
        UpstreamConfig::new(
            "http://upstream.invalid/graphql",
            json!({ "email": "svc@example.test", "password": "pw" }),
        ),
    )
}

/// Gateway wired to `upstream`; the returned handle inspects its calls.
pub struct TestGateway {
    pub state: AppState,
    pub upstream: Arc<FakeUpstream>,
}

impl TestGateway {
    pub fn new(config: GatewayConfig, upstream: FakeUpstream) -> Self {
        let upstream = Arc::new(upstream);
        let state = AppState::new(config, upstream.clone());
        Self { state, upstream }
    }

    pub fn with_defaults(upstream: FakeUpstream) -> Self {
        Self::new(config(), upstream)
    }

    /// GET `uri` with the configured credential.
    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        self.get_with_auth(uri, Some(&basic(CREDENTIAL))).await
    }

    pub async fn get_with_auth(
        &self,
        uri: &str,
        authorization: Option<&str>,
    ) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }

        let response = create_router(self.state.clone())
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }
}

pub fn basic(credential: &str) -> String {
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(credential)
    )
}

pub fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

pub fn text_body(body: &[u8]) -> String {
    String::from_utf8(body.to_vec()).unwrap()
}
