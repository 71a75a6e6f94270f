//! Main entry point for the restosys backend.
//!
//! This file initializes logging, loads the configuration, opens the account
//! store, and serves the Axum router until Ctrl-C.

mod api;
mod app;
mod auth;
mod config;
mod database;
mod errors;
mod middleware;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::{build_router, AppState};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).init();

    let config = Config::from_env().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let store = database::connect(&config.store).context("failed to open account store")?;
    let state = AppState::new(&config.jwt_secret, store).context("failed to initialise auth")?;
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
    }
}
