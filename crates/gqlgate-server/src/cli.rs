//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through its `GQLGATE_*`
//! environment variable. Values are read once at start.

use std::net::SocketAddr;

use clap::Parser;
use gqlgate_core::{AuthConfig, ConfigError, FalsyPolicy, GatewayConfig, UpstreamConfig};

#[derive(Parser, Debug)]
#[command(
    name = "gqlgate",
    version,
    about = "Read-only, allow-listed gateway over an upstream GraphQL platform"
)]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, env = "GQLGATE_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Credential callers must send as basic auth, as `user:password`.
    #[arg(long, env = "GQLGATE_VALID_AUTH", hide_env_values = true)]
    pub valid_auth: String,

    /// Upstream GraphQL endpoint.
    #[arg(long, env = "GQLGATE_API_URL")]
    pub api_url: String,

    /// Login mutation input as a JSON object, e.g. {"email":"..","password":".."}.
    #[arg(long, env = "GQLGATE_LOGIN_CREDS", hide_env_values = true)]
    pub login_creds: String,

    /// Comma-separated resource allow-list.
    #[arg(
        long,
        env = "GQLGATE_RESOURCES",
        value_delimiter = ',',
        default_value = "contact"
    )]
    pub resources: Vec<String>,

    /// Reuse session tokens and schemas for this many seconds (0 = never).
    #[arg(long, env = "GQLGATE_CACHE_TTL_SECS", default_value_t = 0)]
    pub cache_ttl_secs: u64,

    /// Give up on upstream calls after this many seconds.
    #[arg(long, env = "GQLGATE_UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,

    /// Keep `0`, `false` and `""` in records; only drop nulls.
    #[arg(long, env = "GQLGATE_KEEP_FALSY")]
    pub keep_falsy: bool,

    /// Answer unknown resources with 404 and bad dates with 400.
    #[arg(long, env = "GQLGATE_CLIENT_ERROR_STATUS")]
    pub client_error_status: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<GatewayConfig, ConfigError> {
        let login = serde_json::from_str(&self.login_creds)?;

        let upstream = UpstreamConfig {
            timeout_secs: self.upstream_timeout_secs,
            cache_ttl_secs: self.cache_ttl_secs,
            ..UpstreamConfig::new(self.api_url, login)
        };

        let config = GatewayConfig {
            resources: self
                .resources
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
            normalize: if self.keep_falsy {
                FalsyPolicy::DropNull
            } else {
                FalsyPolicy::DropFalsy
            },
            client_error_status: self.client_error_status,
            ..GatewayConfig::new(AuthConfig::new(self.valid_auth), upstream)
        };

        config.validate()?;
        Ok(config)
    }
}
