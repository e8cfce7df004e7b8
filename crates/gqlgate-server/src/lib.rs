//! # gqlgate-server
//!
//! HTTP surface of the gateway: inbound basic auth, the request pipeline
//! and the axum router.

pub mod auth;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod orchestrator;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::Authenticator;
pub use cli::Cli;
pub use error::{GatewayError, StartupError};
pub use orchestrator::{Orchestrator, Outcome, ResourceList, ResourceQuery, Stage};
pub use routes::create_router;
pub use server::GatewayServer;
pub use state::AppState;
