//! # gqlgate-adapter-graphql
//!
//! Upstream GraphQL adapter:
//! - [`session`] logs in and returns a bearer token
//! - [`introspect`] reads a resource's field layout
//! - [`fetch`] runs a synthesized list query
//! - [`upstream::Upstream`] bundles the three calls behind one trait
//! - [`cache::CachingUpstream`] optionally reuses tokens and schemas

pub mod cache;
pub mod client;
pub mod error;
pub mod fetch;
pub mod introspect;
pub mod session;
pub mod upstream;

use std::sync::Arc;

use gqlgate_core::UpstreamConfig;

pub use cache::CachingUpstream;
pub use client::GraphQlClient;
pub use error::UpstreamError;
pub use session::SessionToken;
pub use upstream::{GraphQlUpstream, Upstream};

/// Build the upstream described by `config`, with caching when a TTL is set.
pub fn connect(config: &UpstreamConfig) -> Result<Arc<dyn Upstream>, UpstreamError> {
    let upstream = GraphQlUpstream::from_config(config)?;
    let ttl = config.cache_ttl();

    if ttl.is_zero() {
        Ok(Arc::new(upstream))
    } else {
        tracing::info!(ttl_secs = ttl.as_secs(), "caching session tokens and schemas");
        Ok(Arc::new(CachingUpstream::new(upstream, ttl)))
    }
}
