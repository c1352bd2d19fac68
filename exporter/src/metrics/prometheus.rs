//! Prometheus-backed gauge registry.
//!
//! This module defines a [`MetricsRegistry`] that owns a Prometheus
//! registry namespaced `gaia_exporter` and the four node gauges the
//! scrape pipeline writes into.

use prometheus::{self, Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};

/// Metric namespace prepended to every series name.
pub const NAMESPACE: &str = "gaia_exporter";

/// Label distinguishing [`NodeMetrics::connected_peers_by_version`] series.
pub const VERSION_LABEL: &str = "version";

/// Gauges derived from the node's `/status` and `/net_info` responses.
///
/// Every gauge is an atomic cell, so concurrent scrapes may write the same
/// series without losing updates; the last write wins.
#[derive(Clone)]
pub struct NodeMetrics {
    /// `latest_block_height` from `/status`.
    pub highest_block_number: Gauge,
    /// Local wall clock minus `latest_block_time`, in whole seconds.
    /// Negative when the node's clock runs ahead of ours.
    pub current_block_time_drift: Gauge,
    /// `n_peers` from `/net_info`.
    pub connected_peers: Gauge,
    /// Peer count per reported client version.
    ///
    /// Label values are never removed: a version that disappears from the
    /// peer list keeps its last observed count.
    pub connected_peers_by_version: GaugeVec,
}

impl NodeMetrics {
    /// Registers node metrics into the given `Registry`.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let highest_block_number = Gauge::with_opts(Opts::new(
            "highest_block_number",
            "Highest block number (latest_block_height from /status json).",
        ))?;
        registry.register(Box::new(highest_block_number.clone()))?;

        let current_block_time_drift = Gauge::with_opts(Opts::new(
            "current_block_time_drift",
            "Current time in seconds minus latest_block_time in seconds from /status json.",
        ))?;
        registry.register(Box::new(current_block_time_drift.clone()))?;

        let connected_peers = Gauge::with_opts(Opts::new(
            "connected_peers",
            "How many peers are now connected to the node.",
        ))?;
        registry.register(Box::new(connected_peers.clone()))?;

        let connected_peers_by_version = GaugeVec::new(
            Opts::new(
                "connected_peers_by_version",
                "How many peers are now connected to the node by version.",
            ),
            &[VERSION_LABEL],
        )?;
        registry.register(Box::new(connected_peers_by_version.clone()))?;

        Ok(Self {
            highest_block_number,
            current_block_time_drift,
            connected_peers,
            connected_peers_by_version,
        })
    }
}

/// Wrapper around a Prometheus registry and the node gauges.
///
/// This is the single owner of all gauge state. Wrap it in an
/// [`Arc`](std::sync::Arc) and hand clones to every scrape handler.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Registry,
    pub node: NodeMetrics,
}

impl MetricsRegistry {
    /// Creates a new `MetricsRegistry` with a fresh `gaia_exporter`
    /// namespaced registry and registers the node metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some(NAMESPACE.to_string()), None)?;
        let node = NodeMetrics::register(&registry)?;
        Ok(Self { registry, node })
    }

    pub fn set_highest_block(&self, height: f64) {
        self.node.highest_block_number.set(height);
    }

    pub fn set_block_time_drift(&self, drift_secs: i64) {
        self.node.current_block_time_drift.set(drift_secs as f64);
    }

    pub fn set_connected_peers(&self, peers: i64) {
        self.node.connected_peers.set(peers as f64);
    }

    pub fn set_connected_peers_by_version(&self, version: &str, peers: u64) {
        self.node
            .connected_peers_by_version
            .with_label_values(&[version])
            .set(peers as f64);
    }

    /// Current count for `version`, or `None` if that label was never set.
    ///
    /// Reads the gathered families so that looking up an unseen version
    /// does not create an empty series for it.
    #[cfg(test)]
    pub(crate) fn connected_peers_for_version(&self, version: &str) -> Option<f64> {
        let name = format!("{NAMESPACE}_connected_peers_by_version");
        self.registry
            .gather()
            .iter()
            .filter(|mf| mf.get_name() == name)
            .flat_map(|mf| mf.get_metric())
            .find(|m| {
                m.get_label()
                    .iter()
                    .any(|l| l.get_name() == VERSION_LABEL && l.get_value() == version)
            })
            .map(|m| m.get_gauge().get_value())
    }

    /// Encodes all metrics in this registry into the Prometheus text format.
    pub fn export(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("failed to encode Prometheus metrics: {e}");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }

    /// Content type of [`Self::export`]'s output.
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}
