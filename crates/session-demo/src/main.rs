//! `session-demo` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the [`Tokener`] from `TOKEN_KEY` and `TOKEN_TTL_SECS`.
//! 4. Build the Axum router and serve HTTP.

mod config;
mod error;
mod protocol;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use securetoken::Tokener;
use tracing::{info, warn};

use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        "session-demo starting"
    );

    // -----------------------------------------------------------------------
    // 3. Tokener
    // -----------------------------------------------------------------------
    let tokener = Tokener::new(&cfg.key_bytes()?, cfg.ttl()).context("failed to build tokener")?;
    info!(suite = %tokener.suite(), ttl_secs = cfg.token_ttl_secs, "tokener ready");
    if cfg.token_ttl_secs == 0 {
        warn!("TOKEN_TTL_SECS is 0; sessions expire as soon as they are issued");
    }

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(tokener, cfg.cookie_name.clone());
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
