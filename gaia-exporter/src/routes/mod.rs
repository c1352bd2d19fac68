pub mod health;
pub mod metrics;

use std::fmt::Display;
use std::net::SocketAddr;

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

/// Logs `err` with its request context and answers a bare 500.
pub fn server_error(
    method: &Method,
    uri: &Uri,
    remote: SocketAddr,
    err: impl Display,
) -> Response {
    tracing::error!(ip = %remote, method = %method, uri = %uri, "{err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
