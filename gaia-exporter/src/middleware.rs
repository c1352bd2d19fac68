//! Request middleware applied to every route.
//!
//! Layered outermost first:
//!
//! 1. `Server: gaia-exporter` on every response, including recovered panics,
//! 2. [`recover_panic`],
//! 3. [`log_request`].

use std::any::Any;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;

use axum::Router;
use axum::extract::{ConnectInfo, Request};
use axum::http::{HeaderValue, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use futures::FutureExt;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::routes::server_error;

pub const SERVER_NAME: &str = "gaia-exporter";

/// Wraps `router` in the exporter's middleware chain.
pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(middleware::from_fn(log_request))
        .layer(middleware::from_fn(recover_panic))
        .layer(SetResponseHeaderLayer::overriding(
            header::SERVER,
            HeaderValue::from_static(SERVER_NAME),
        ))
}

/// Turns a panic anywhere below this layer into a 500 and closes the
/// connection. The process keeps serving.
pub async fn recover_panic(
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(resp) => resp,
        Err(panic) => {
            let reason = format!("panic recovered: {}", panic_message(panic.as_ref()));
            let mut resp = server_error(&method, &uri, remote, reason);
            resp.headers_mut()
                .insert(header::CONNECTION, HeaderValue::from_static("close"));
            resp
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

pub async fn log_request(
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    tracing::info!(
        ip = %remote,
        proto = ?req.version(),
        method = %req.method(),
        uri = %req.uri(),
        "received request"
    );
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_handles_common_payloads() {
        let s: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(s.as_ref()), "static");

        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");

        let other: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(other.as_ref()), "unknown panic payload");
    }
}
