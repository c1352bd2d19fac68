//! Exporter library crate.
//!
//! This crate provides the scrape pipeline behind the Gaia exporter's
//! `/metrics` endpoint:
//!
//! - per-process configuration (`config`),
//! - the node RPC client (`node_client`),
//! - the `/status` and `/net_info` collectors (`collect`),
//! - the Prometheus gauge registry (`metrics`),
//! - and the ordered pipeline that ties them together (`pipeline`).
//!
//! The binary crate only adds HTTP plumbing on top of these pieces.

pub mod collect;
pub mod config;
pub mod error;
pub mod metrics;
pub mod node_client;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testing;

pub use collect::{Collector, NetInfoCollector, NodeNetInfo, NodeStatus, StatusCollector};
pub use config::{DEFAULT_NODE_URL, DEFAULT_PORT, ScrapeConfig};
pub use error::{ScrapeAborted, ScrapeError};
pub use metrics::{MetricsRegistry, NodeMetrics};
pub use node_client::{HttpNodeClient, NodeRpc};
pub use pipeline::{ScrapePipeline, ScrapeState};
