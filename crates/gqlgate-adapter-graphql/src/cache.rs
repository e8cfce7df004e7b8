//! Optional TTL cache in front of login and introspection.
//!
//! Only used when `cache_ttl_secs` is non-zero. List results are never
//! cached. A failed call made with a cached token evicts that token so the
//! next request logs in again; the failing request itself is not retried.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use gqlgate_core::{AuthorizedResource, ListQuery, ResourceSchema};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::UpstreamError;
use crate::session::SessionToken;
use crate::upstream::Upstream;

#[derive(Clone)]
struct Cached<T> {
    value: T,
    expires_at: Instant,
}

impl<T: Clone> Cached<T> {
    fn fresh(&self, now: Instant) -> Option<T> {
        (self.expires_at > now).then(|| self.value.clone())
    }
}

pub struct CachingUpstream<U> {
    inner: U,
    ttl: Duration,
    token: RwLock<Option<Cached<SessionToken>>>,
    schemas: RwLock<HashMap<AuthorizedResource, Cached<ResourceSchema>>>,
}

impl<U: Upstream> CachingUpstream<U> {
    pub fn new(inner: U, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            token: RwLock::new(None),
            schemas: RwLock::new(HashMap::new()),
        }
    }

    async fn evict_token(&self) {
        if self.token.write().await.take().is_some() {
            tracing::debug!("evicted cached session token after upstream failure");
        }
    }
}

#[async_trait]
impl<U: Upstream> Upstream for CachingUpstream<U> {
    async fn login(&self) -> Result<SessionToken, UpstreamError> {
        let now = Instant::now();
        if let Some(token) = self.token.read().await.as_ref().and_then(|c| c.fresh(now)) {
            return Ok(token);
        }

        let token = self.inner.login().await?;
        *self.token.write().await = Some(Cached {
            value: token.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        Ok(token)
    }

    async fn describe(
        &self,
        resource: &AuthorizedResource,
        token: &SessionToken,
    ) -> Result<ResourceSchema, UpstreamError> {
        let now = Instant::now();
        if let Some(schema) = self
            .schemas
            .read()
            .await
            .get(resource)
            .and_then(|c| c.fresh(now))
        {
            return Ok(schema);
        }

        let schema = match self.inner.describe(resource, token).await {
            Ok(schema) => schema,
            Err(err) => {
                self.evict_token().await;
                return Err(err);
            }
        };

        let now = Instant::now();
        let mut schemas = self.schemas.write().await;
        schemas.retain(|_, entry| entry.expires_at > now);
        schemas.insert(
            resource.clone(),
            Cached {
                value: schema.clone(),
                expires_at: now + self.ttl,
            },
        );
        Ok(schema)
    }

    async fn fetch_items(
        &self,
        query: &ListQuery,
        token: &SessionToken,
    ) -> Result<Vec<Value>, UpstreamError> {
        let result = self.inner.fetch_items(query, token).await;
        if result.is_err() {
            self.evict_token().await;
        }
        result
    }
}
