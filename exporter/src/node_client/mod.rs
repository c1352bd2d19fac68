//! Clients for the monitored node's RPC server.
//!
//! The scrape pipeline only ever talks to the node through [`NodeRpc`],
//! which returns raw response bodies. Decoding is left to the collectors,
//! so a transport never needs to know the shape of the payloads.

pub mod http;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ScrapeError;

pub use http::HttpNodeClient;

/// Read-only access to the two RPC endpoints the exporter consumes.
///
/// Each call performs exactly one request and no retries. Transport
/// failures are reported as [`ScrapeError::FetchFailed`].
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// Raw body of `GET {base}/status`.
    async fn fetch_status(&self) -> Result<Bytes, ScrapeError>;

    /// Raw body of `GET {base}/net_info`.
    async fn fetch_net_info(&self) -> Result<Bytes, ScrapeError>;
}
