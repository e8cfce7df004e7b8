//! # gqlgate-core
//!
//! The I/O-free half of the gateway:
//! - configuration types shared by the adapter and the server
//! - the per-request data model (field descriptors, resource schemas, records)
//! - the resource allow-list gate
//! - list-query synthesis (projection + optional `updatedAt` filter)
//! - record normalization
//!
//! Nothing in here talks to the network. The upstream calls live in
//! `gqlgate-adapter-graphql`; sequencing lives in `gqlgate-server`.

pub mod authorizer;
pub mod config;
pub mod date;
pub mod error;
pub mod model;
pub mod normalize;
pub mod synth;

pub use authorizer::{AuthorizedResource, ResourceAuthorizer};
pub use config::{AuthConfig, ConfigError, GatewayConfig, UpstreamConfig};
pub use error::CoreError;
pub use model::{FieldDescriptor, FieldKind, QueryFilter, Record, ResourceSchema};
pub use normalize::{FalsyPolicy, Normalizer};
pub use synth::{ListQuery, ProjectionClause, build_filter, build_list_query, build_projection};
