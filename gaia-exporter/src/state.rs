//! Shared application state.

use std::sync::Arc;

use anyhow::Context;

use exporter::{HttpNodeClient, MetricsRegistry, ScrapeConfig, ScrapePipeline};

/// State shared by every request handler.
///
/// This is wrapped in an [`Arc`] and passed to handlers via axum's
/// `State` extractor.
pub struct AppState {
    /// Scrape pipeline, owning the node client and the metrics registry.
    pub pipeline: ScrapePipeline,
}

/// Thread-safe alias for `AppState`.
pub type SharedState = Arc<AppState>;

/// Wires the HTTP node client and a fresh registry into a pipeline.
pub fn build_state(cfg: &ScrapeConfig) -> anyhow::Result<SharedState> {
    let metrics =
        Arc::new(MetricsRegistry::new().context("failed to initialise metrics registry")?);
    let node = Arc::new(HttpNodeClient::new(cfg).context("failed to build node RPC client")?);

    Ok(Arc::new(AppState {
        pipeline: ScrapePipeline::new(node, metrics),
    }))
}
