//! HTTP client for a Tendermint/CometBFT RPC server.
//!
//! Both endpoints are plain unauthenticated GETs:
//!
//! ```text
//! GET {base}/status
//! GET {base}/net_info
//! ```
//!
//! The body is returned as-is. HTTP status codes are not inspected: an
//! error page that is not valid JSON surfaces later as a malformed
//! response, while a JSON error body is decoded like any other.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::node_client::NodeRpc;

/// `reqwest`-backed implementation of [`NodeRpc`].
///
/// The underlying [`Client`] keeps a connection pool and is cheap to share;
/// one instance serves every concurrent scrape. No timeout is configured
/// beyond the client's defaults.
#[derive(Clone, Debug)]
pub struct HttpNodeClient {
    client: Client,
    status_url: String,
    net_info_url: String,
}

impl HttpNodeClient {
    /// Builds a client for the node at `cfg.node_url`.
    pub fn new(cfg: &ScrapeConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(cfg, client))
    }

    /// Uses an existing `reqwest` client, e.g. one shared with other code.
    pub fn with_client(cfg: &ScrapeConfig, client: Client) -> Self {
        Self {
            client,
            status_url: cfg.endpoint("/status"),
            net_info_url: cfg.endpoint("/net_info"),
        }
    }

    async fn get(&self, url: &str) -> Result<Bytes, ScrapeError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::fetch_failed(url, e))?;

        tracing::debug!(url, status = %resp.status(), "node responded");

        resp.bytes()
            .await
            .map_err(|e| ScrapeError::fetch_failed(url, e))
    }
}

#[async_trait]
impl NodeRpc for HttpNodeClient {
    async fn fetch_status(&self) -> Result<Bytes, ScrapeError> {
        self.get(&self.status_url).await
    }

    async fn fetch_net_info(&self) -> Result<Bytes, ScrapeError> {
        self.get(&self.net_info_url).await
    }
}
