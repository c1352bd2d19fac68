//! The per-request scrape pipeline.
//!
//! A scrape walks a fixed state machine:
//!
//! ```text
//! Start -> StatusCollected -> NetInfoCollected -> Exported
//!   |            |
//!   +------------+--> aborted (ScrapeAborted)
//! ```
//!
//! [`ScrapePipeline::run`] drives an ordered list of [`Collector`]s and stops
//! at the first one that fails. Registry writes made by earlier collectors
//! are not rolled back, so a scrape that aborts in `net_info` still leaves
//! fresh block gauges behind.

use std::sync::Arc;

use crate::collect::{Collector, NetInfoCollector, StatusCollector};
use crate::error::ScrapeAborted;
use crate::metrics::MetricsRegistry;
use crate::node_client::NodeRpc;

/// Progress of a single scrape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrapeState {
    Start,
    StatusCollected,
    NetInfoCollected,
    Exported,
}

/// Ordered chain of collectors feeding one shared registry.
///
/// One pipeline is built at startup and shared by every request; `run` may
/// be called concurrently. Concurrent scrapes are not coalesced: each one
/// fetches and overwrites the full signal set on its own.
pub struct ScrapePipeline {
    node: Arc<dyn NodeRpc>,
    metrics: Arc<MetricsRegistry>,
    collectors: Vec<Box<dyn Collector>>,
}

impl ScrapePipeline {
    /// Pipeline running the status collector, then the net_info collector.
    pub fn new(node: Arc<dyn NodeRpc>, metrics: Arc<MetricsRegistry>) -> Self {
        let collectors: Vec<Box<dyn Collector>> =
            vec![Box::new(StatusCollector), Box::new(NetInfoCollector)];
        Self::with_collectors(node, metrics, collectors)
    }

    /// Pipeline running exactly `collectors`, in order.
    pub fn with_collectors(
        node: Arc<dyn NodeRpc>,
        metrics: Arc<MetricsRegistry>,
        collectors: Vec<Box<dyn Collector>>,
    ) -> Self {
        Self {
            node,
            metrics,
            collectors,
        }
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Runs every collector in order, then encodes the registry.
    ///
    /// Returns the exposition text on success. On failure nothing is
    /// encoded and the error records how far the scrape got.
    pub async fn run(&self) -> Result<String, ScrapeAborted> {
        let mut state = ScrapeState::Start;

        for collector in &self.collectors {
            if let Err(source) = collector.collect(self.node.as_ref(), &self.metrics).await {
                tracing::debug!(?state, collector = collector.name(), "scrape aborted");
                return Err(ScrapeAborted {
                    at: state,
                    collector: collector.name(),
                    source,
                });
            }
            state = collector.reached();
            tracing::debug!(?state, collector = collector.name(), "collector finished");
        }

        let body = self.metrics.export();
        tracing::debug!(state = ?ScrapeState::Exported, bytes = body.len(), "scrape exported");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::testing::{StaticNode, net_info_json, status_json};

    fn pipeline(node: Arc<StaticNode>) -> ScrapePipeline {
        let metrics = Arc::new(MetricsRegistry::new().expect("registry"));
        ScrapePipeline::new(node, metrics)
    }

    #[tokio::test]
    async fn full_scrape_exports_all_series() {
        let node = Arc::new(StaticNode::new(
            Some(status_json("100", "2024-03-01T12:00:00Z")),
            Some(net_info_json("3", &["v1", "v1", "v2"])),
        ));
        let pipeline = pipeline(node.clone());

        let body = pipeline.run().await.expect("scrape should succeed");

        assert!(body.contains("gaia_exporter_highest_block_number 100"));
        assert!(body.contains("gaia_exporter_current_block_time_drift"));
        assert!(body.contains("gaia_exporter_connected_peers 3"));
        assert!(body.contains("gaia_exporter_connected_peers_by_version{version=\"v1\"} 2"));
        assert!(body.contains("gaia_exporter_connected_peers_by_version{version=\"v2\"} 1"));
        assert_eq!(node.status_calls(), 1);
        assert_eq!(node.net_info_calls(), 1);
    }

    #[tokio::test]
    async fn status_failure_skips_net_info_and_updates_nothing() {
        let node = Arc::new(StaticNode::new(None, Some(net_info_json("3", &["v1"]))));
        let pipeline = pipeline(node.clone());

        let err = pipeline.run().await.expect_err("status is unreachable");

        assert_eq!(err.at, ScrapeState::Start);
        assert_eq!(err.collector, "status");
        assert!(matches!(err.source, ScrapeError::FetchFailed { .. }));
        assert_eq!(node.net_info_calls(), 0);

        let m = pipeline.metrics();
        assert_eq!(m.node.highest_block_number.get(), 0.0);
        assert_eq!(m.node.connected_peers.get(), 0.0);
        assert_eq!(m.connected_peers_for_version("v1"), None);
    }

    #[tokio::test]
    async fn net_info_failure_keeps_status_gauges() {
        let node = Arc::new(StaticNode::new(
            Some(status_json("555", "2024-03-01T12:00:00Z")),
            None,
        ));
        let pipeline = pipeline(node);

        let err = pipeline.run().await.expect_err("net_info is unreachable");

        assert_eq!(err.at, ScrapeState::StatusCollected);
        assert_eq!(err.collector, "net_info");
        assert_eq!(pipeline.metrics().node.highest_block_number.get(), 555.0);
    }

    #[tokio::test]
    async fn malformed_height_aborts_before_net_info() {
        let node = Arc::new(StaticNode::new(
            Some(status_json("n/a", "2024-03-01T12:00:00Z")),
            Some(net_info_json("3", &["v1"])),
        ));
        let pipeline = pipeline(node.clone());

        let err = pipeline.run().await.expect_err("height is not numeric");

        assert!(matches!(err.source, ScrapeError::MalformedResponse { .. }));
        assert_eq!(node.net_info_calls(), 0);
    }

    #[tokio::test]
    async fn repeated_scrapes_are_stable() {
        let node = Arc::new(StaticNode::new(
            Some(status_json("42", "2024-03-01T12:00:00Z")),
            Some(net_info_json("2", &["v1", "v2"])),
        ));
        let pipeline = pipeline(node);

        pipeline.run().await.expect("first scrape");
        let first = (
            pipeline.metrics().node.highest_block_number.get(),
            pipeline.metrics().node.connected_peers.get(),
            pipeline.metrics().connected_peers_for_version("v1"),
        );
        pipeline.run().await.expect("second scrape");
        let second = (
            pipeline.metrics().node.highest_block_number.get(),
            pipeline.metrics().node.connected_peers.get(),
            pipeline.metrics().connected_peers_for_version("v1"),
        );

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_collector_list_just_exports() {
        let node = Arc::new(StaticNode::new(None, None));
        let metrics = Arc::new(MetricsRegistry::new().expect("registry"));
        metrics.set_highest_block(7.0);
        let pipeline = ScrapePipeline::with_collectors(node.clone(), metrics, Vec::new());

        let body = pipeline.run().await.expect("nothing can fail");

        assert!(body.contains("gaia_exporter_highest_block_number 7"));
        assert_eq!(node.status_calls(), 0);
    }
}
