//! Gateway server implementation.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::error::StartupError;
use crate::routes;
use crate::state::AppState;

/// The gateway server.
pub struct GatewayServer {
    bind: SocketAddr,
    state: AppState,
}

impl GatewayServer {
    pub fn new(bind: SocketAddr, state: AppState) -> Self {
        Self { bind, state }
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<(), StartupError> {
        let listener = TcpListener::bind(self.bind)
            .await
            .map_err(|source| StartupError::Bind {
                addr: self.bind,
                source,
            })?;

        tracing::info!(
            address = %self.bind,
            resources = ?self.state.config().resources,
            "gqlgate listening"
        );

        axum::serve(listener, routes::create_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(StartupError::Serve)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
