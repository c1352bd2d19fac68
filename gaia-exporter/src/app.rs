//! HTTP router for the exporter.

use axum::Router;
use axum::routing::get;

use crate::middleware;
use crate::routes::{health, metrics};
use crate::state::SharedState;

/// `GET /health` and `GET /metrics`, wrapped in the middleware chain.
pub fn router(state: SharedState) -> Router {
    middleware::apply(
        Router::new()
            .route("/health", get(health::health))
            .route("/metrics", get(metrics::metrics)),
    )
    .with_state(state)
}
