//! Resource allow-list.
//!
//! Resource names end up inside query text (`contactsList`), so the
//! allow-list is what keeps caller input out of the query. The only way to
//! obtain an [`AuthorizedResource`] is through [`ResourceAuthorizer::authorize`],
//! and the synthesizer and adapter only accept that type.

use std::fmt;

use crate::config::GatewayConfig;
use crate::error::CoreError;

/// A resource name that passed the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorizedResource(String);

impl AuthorizedResource {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the upstream list field, built by suffix append (`contact` -> `contactsList`).
    pub fn list_field(&self) -> String {
        format!("{}sList", self.0)
    }
}

impl fmt::Display for AuthorizedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks caller-supplied resource names against a fixed list.
#[derive(Debug, Clone)]
pub struct ResourceAuthorizer {
    allowed: Vec<String>,
}

impl ResourceAuthorizer {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.resources.iter().cloned())
    }

    /// The allow-list, in configured order.
    pub fn resources(&self) -> &[String] {
        &self.allowed
    }

    pub fn authorize(&self, name: &str) -> Result<AuthorizedResource, CoreError> {
        if self.allowed.iter().any(|allowed| allowed == name) {
            Ok(AuthorizedResource(name.to_string()))
        } else {
            Err(CoreError::UnknownResource {
                name: name.to_string(),
            })
        }
    }
}

/// `true` for names matching `[_A-Za-z][_0-9A-Za-z]*`.
pub fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
