//! `/net_info` decoding and peer aggregation.
//!
//! The exporter reads the advertised peer count and each peer's reported
//! client version:
//!
//! ```json
//! {
//!   "result": {
//!     "listening": true,
//!     "n_peers": "3",
//!     "peers": [
//!       { "node_info": { "version": "0.37.4", "moniker": "a" }, "remote_ip": "..." },
//!       { "node_info": { "version": "0.37.4" } },
//!       { "node_info": { "version": "" } }
//!     ]
//!   }
//! }
//! ```
//!
//! A `n_peers` value that is missing or not an integer does not fail the
//! step: the peer count gauge keeps its previous value and the per-version
//! counts are still updated. The same holds for a JSON body with no
//! `result` at all, such as a JSON-RPC error reply.

use std::collections::HashMap;
use std::num::ParseIntError;

use async_trait::async_trait;
use serde::Deserialize;

use crate::collect::Collector;
use crate::error::ScrapeError;
use crate::metrics::MetricsRegistry;
use crate::node_client::NodeRpc;
use crate::pipeline::ScrapeState;

#[derive(Debug, Deserialize)]
struct NetInfoResponse {
    #[serde(default)]
    result: NetInfoResult,
}

#[derive(Debug, Default, Deserialize)]
struct NetInfoResult {
    #[serde(default)]
    n_peers: Option<String>,
    #[serde(default)]
    peers: Option<Vec<Peer>>,
}

#[derive(Debug, Deserialize)]
struct Peer {
    #[serde(default)]
    node_info: Option<PeerNodeInfo>,
}

#[derive(Debug, Deserialize)]
struct PeerNodeInfo {
    #[serde(default)]
    version: Option<String>,
}

/// The part of a `/net_info` response the exporter cares about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeNetInfo {
    /// `n_peers` exactly as reported (empty if absent).
    pub n_peers: String,
    /// One entry per peer, in response order. Peers without a version
    /// report `""`.
    pub peer_versions: Vec<String>,
}

impl NodeNetInfo {
    /// Decodes a raw `/net_info` body.
    pub fn parse(raw: &[u8]) -> Result<Self, ScrapeError> {
        let resp: NetInfoResponse = serde_json::from_slice(raw)
            .map_err(|e| ScrapeError::malformed("/net_info body", e))?;

        let peer_versions = resp
            .result
            .peers
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.node_info.and_then(|n| n.version).unwrap_or_default())
            .collect();

        Ok(Self {
            n_peers: resp.result.n_peers.unwrap_or_default(),
            peer_versions,
        })
    }

    /// `n_peers` as an integer.
    pub fn connected_peers(&self) -> Result<i64, ParseIntError> {
        self.n_peers.parse()
    }

    /// Number of peers reporting each distinct version.
    pub fn peers_by_version(&self) -> HashMap<&str, u64> {
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for version in &self.peer_versions {
            *counts.entry(version.as_str()).or_default() += 1;
        }
        counts
    }
}

/// Collects `connected_peers` and `connected_peers_by_version`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NetInfoCollector;

impl NetInfoCollector {
    /// Writes the signals of an already fetched body.
    pub fn apply(
        &self,
        raw: &[u8],
        metrics: &MetricsRegistry,
    ) -> Result<NodeNetInfo, ScrapeError> {
        let info = NodeNetInfo::parse(raw)?;

        match info.connected_peers() {
            Ok(peers) => metrics.set_connected_peers(peers),
            Err(e) => tracing::warn!(
                n_peers = %info.n_peers,
                "ignoring unparseable peer count: {e}"
            ),
        }

        // Only versions seen in this response are written; older labels
        // keep whatever count they last had.
        for (version, peers) in info.peers_by_version() {
            metrics.set_connected_peers_by_version(version, peers);
        }

        tracing::debug!(
            n_peers = %info.n_peers,
            listed = info.peer_versions.len(),
            "collected node net_info"
        );
        Ok(info)
    }
}

#[async_trait]
impl Collector for NetInfoCollector {
    fn name(&self) -> &'static str {
        "net_info"
    }

    fn reached(&self) -> ScrapeState {
        ScrapeState::NetInfoCollected
    }

    async fn collect(
        &self,
        node: &dyn NodeRpc,
        metrics: &MetricsRegistry,
    ) -> Result<(), ScrapeError> {
        let raw = node.fetch_net_info().await?;
        self.apply(&raw, metrics)?;
        Ok(())
    }
}
