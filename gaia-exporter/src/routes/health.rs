use axum::http::StatusCode;

/// `GET /health`
///
/// Liveness only; never contacts the node.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
