//! gqlgate binary.

use anyhow::{Context, Result};
use clap::Parser;
use gqlgate_server::{AppState, Cli, GatewayServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let bind = cli.bind;
    let config = cli.into_config().context("invalid configuration")?;

    let state = AppState::from_config(config).context("failed to build upstream client")?;

    GatewayServer::new(bind, state).run().await?;

    Ok(())
}
