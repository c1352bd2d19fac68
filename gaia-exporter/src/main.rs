// gaia-exporter/src/main.rs

//! Gaia exporter binary.
//!
//! This binary exposes a small HTTP API on top of the `exporter` crate:
//!
//! - `GET /health`
//! - `GET /metrics`
//!
//! Every `/metrics` request scrapes the configured node's `/status` and
//! `/net_info` endpoints before rendering the gauges.

mod app;
mod config;
mod middleware;
mod routes;
mod state;

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tokio::signal;

use config::Cli;
use exporter::ScrapeConfig;

#[tokio::main]
async fn main() {
    // Basic tracing setup.
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "gaia_exporter=info,exporter=info".to_string()),
        )
        .init();

    let cfg = ScrapeConfig::from(Cli::parse());

    if let Err(e) = run(cfg).await {
        tracing::error!("fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cfg: ScrapeConfig) -> anyhow::Result<()> {
    let app_state = state::build_state(&cfg)?;
    let app = app::router(app_state);

    let addr = cfg.listen_addr();
    tracing::info!(
        addr = %addr,
        version = env!("CARGO_PKG_VERSION"),
        gaia_url = %cfg.node_url,
        "starting gaia-exporter"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    Ok(())
}

/// Waits for Ctrl-C and returns, used for graceful shutdown.
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
