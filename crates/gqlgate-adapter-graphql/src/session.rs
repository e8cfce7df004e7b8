//! Session token acquisition.

use std::fmt;

use serde_json::{Value, json};

use crate::client::GraphQlClient;
use crate::error::UpstreamError;

/// Login mutation. The configured credentials travel as `$data`.
pub const LOGIN_MUTATION: &str = "mutation UserLogin($data: UserLoginInput!) { \
     userLogin(data: $data) { success auth { idToken refreshToken } } }";

/// Short-lived bearer token issued by the upstream login.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Exchange the configured login payload for a session token.
pub async fn login(client: &GraphQlClient, payload: &Value) -> Result<SessionToken, UpstreamError> {
    let data = client
        .execute(LOGIN_MUTATION, json!({ "data": payload }), None)
        .await?;
    token_from_login(&data)
}

pub(crate) fn token_from_login(data: &Value) -> Result<SessionToken, UpstreamError> {
    data.pointer("/userLogin/auth/idToken")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(SessionToken::new)
        .ok_or_else(|| {
            UpstreamError::MalformedResponse("login response has no idToken".to_string())
        })
}
