//! Test fixtures shared by the collector and pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ScrapeError;
use crate::node_client::NodeRpc;

/// In-memory node serving fixed bodies. `None` simulates an unreachable
/// endpoint.
pub struct StaticNode {
    status: Option<String>,
    net_info: Option<String>,
    status_calls: AtomicUsize,
    net_info_calls: AtomicUsize,
}

impl StaticNode {
    pub fn new(status: Option<String>, net_info: Option<String>) -> Self {
        Self {
            status,
            net_info,
            status_calls: AtomicUsize::new(0),
            net_info_calls: AtomicUsize::new(0),
        }
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn net_info_calls(&self) -> usize {
        self.net_info_calls.load(Ordering::SeqCst)
    }
}

fn serve(body: &Option<String>, endpoint: &str) -> Result<Bytes, ScrapeError> {
    body.clone()
        .map(Bytes::from)
        .ok_or_else(|| ScrapeError::fetch_failed(endpoint, "connection refused"))
}

#[async_trait]
impl NodeRpc for StaticNode {
    async fn fetch_status(&self) -> Result<Bytes, ScrapeError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        serve(&self.status, "static://status")
    }

    async fn fetch_net_info(&self) -> Result<Bytes, ScrapeError> {
        self.net_info_calls.fetch_add(1, Ordering::SeqCst);
        serve(&self.net_info, "static://net_info")
    }
}

/// Minimal `/status` body.
pub fn status_json(height: &str, block_time: &str) -> String {
    format!(
        r#"{{"jsonrpc":"2.0","id":-1,"result":{{"node_info":{{"moniker":"test"}},"sync_info":{{"latest_block_height":"{height}","latest_block_time":"{block_time}","catching_up":false}}}}}}"#
    )
}

/// Minimal `/net_info` body with one peer per entry of `versions`.
pub fn net_info_json(n_peers: &str, versions: &[&str]) -> String {
    let peers: Vec<String> = versions
        .iter()
        .map(|v| format!(r#"{{"node_info":{{"version":"{v}"}},"remote_ip":"10.0.0.1"}}"#))
        .collect();
    format!(
        r#"{{"jsonrpc":"2.0","id":-1,"result":{{"listening":true,"n_peers":"{n_peers}","peers":[{}]}}}}"#,
        peers.join(",")
    )
}
