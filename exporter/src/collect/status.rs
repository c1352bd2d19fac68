//! `/status` decoding and derived block signals.
//!
//! Only `result.sync_info` is consumed:
//!
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "id": -1,
//!   "result": {
//!     "node_info": { "...": "ignored" },
//!     "sync_info": {
//!       "latest_block_height": "19876543",
//!       "latest_block_time": "2024-03-01T12:00:00.123456789Z",
//!       "catching_up": false
//!     },
//!     "validator_info": { "...": "ignored" }
//!   }
//! }
//! ```
//!
//! Every other field is tolerated and discarded.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::collect::Collector;
use crate::error::ScrapeError;
use crate::metrics::MetricsRegistry;
use crate::node_client::NodeRpc;
use crate::pipeline::ScrapeState;

#[derive(Debug, Deserialize)]
struct StatusResponse {
    result: StatusResult,
}

#[derive(Debug, Deserialize)]
struct StatusResult {
    sync_info: SyncInfo,
}

#[derive(Debug, Deserialize)]
struct SyncInfo {
    latest_block_height: String,
    latest_block_time: DateTime<Utc>,
}

/// The part of a `/status` response the exporter cares about.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStatus {
    /// `latest_block_height`, parsed from its numeric string.
    pub latest_block_height: f64,
    pub latest_block_time: DateTime<Utc>,
}

impl NodeStatus {
    /// Decodes a raw `/status` body.
    ///
    /// Fails with [`ScrapeError::MalformedResponse`] if the body is not the
    /// expected JSON or the block height is not a number.
    pub fn parse(raw: &[u8]) -> Result<Self, ScrapeError> {
        let resp: StatusResponse =
            serde_json::from_slice(raw).map_err(|e| ScrapeError::malformed("/status body", e))?;
        let sync = resp.result.sync_info;

        let latest_block_height = sync.latest_block_height.parse::<f64>().map_err(|e| {
            ScrapeError::malformed(
                "latest_block_height",
                format!("{:?}: {e}", sync.latest_block_height),
            )
        })?;

        Ok(Self {
            latest_block_height,
            latest_block_time: sync.latest_block_time,
        })
    }

    /// Whole seconds between `now` and the latest block time.
    ///
    /// Both instants are truncated to Unix seconds before subtracting, so a
    /// block produced "in the future" by a fast remote clock yields a negative
    /// drift.
    pub fn block_time_drift(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp() - self.latest_block_time.timestamp()
    }
}

/// Collects `highest_block_number` and `current_block_time_drift`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusCollector;

impl StatusCollector {
    /// Writes the signals of an already fetched body, using `now` as the
    /// local clock reading.
    pub fn apply(
        &self,
        raw: &[u8],
        now: DateTime<Utc>,
        metrics: &MetricsRegistry,
    ) -> Result<NodeStatus, ScrapeError> {
        let status = NodeStatus::parse(raw)?;
        let drift = status.block_time_drift(now);

        metrics.set_highest_block(status.latest_block_height);
        metrics.set_block_time_drift(drift);

        tracing::debug!(
            height = status.latest_block_height,
            drift_secs = drift,
            "collected node status"
        );
        Ok(status)
    }
}

#[async_trait]
impl Collector for StatusCollector {
    fn name(&self) -> &'static str {
        "status"
    }

    fn reached(&self) -> ScrapeState {
        ScrapeState::StatusCollected
    }

    async fn collect(
        &self,
        node: &dyn NodeRpc,
        metrics: &MetricsRegistry,
    ) -> Result<(), ScrapeError> {
        let raw = node.fetch_status().await?;
        self.apply(&raw, Utc::now(), metrics)?;
        Ok(())
    }
}
