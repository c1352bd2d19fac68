use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{Method, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::routes::server_error;
use crate::state::SharedState;

/// `GET /metrics`
///
/// Runs the scrape pipeline and returns the registry in the Prometheus
/// text format. A failed collector turns the whole response into a 500;
/// gauges written before the failure stay in the registry.
pub async fn metrics(
    State(state): State<SharedState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
) -> Response {
    match state.pipeline.run().await {
        Ok(body) => (
            [(header::CONTENT_TYPE, state.pipeline.metrics().content_type())],
            body,
        )
            .into_response(),
        Err(e) => server_error(&method, &uri, remote, e),
    }
}
