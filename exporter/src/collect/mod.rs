//! Collection steps run by the scrape pipeline.
//!
//! Each [`Collector`] fetches one RPC response through a [`NodeRpc`],
//! derives its signals and writes them into the [`MetricsRegistry`]:
//!
//! - [`status::StatusCollector`]: block height and block time drift,
//! - [`net_info::NetInfoCollector`]: peer count and peers per version.

pub mod net_info;
pub mod status;

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::metrics::MetricsRegistry;
use crate::node_client::NodeRpc;
use crate::pipeline::ScrapeState;

pub use net_info::{NetInfoCollector, NodeNetInfo};
pub use status::{NodeStatus, StatusCollector};

/// One ordered step of a scrape.
///
/// A collector either commits all of its registry writes and returns
/// `Ok(())`, or returns an error that aborts the rest of the scrape.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Short name used in logs and in [`crate::ScrapeAborted`].
    fn name(&self) -> &'static str;

    /// State the pipeline enters once this collector succeeds.
    fn reached(&self) -> ScrapeState;

    /// Fetches one response through `node` and writes its signals into
    /// `metrics`.
    async fn collect(
        &self,
        node: &dyn NodeRpc,
        metrics: &MetricsRegistry,
    ) -> Result<(), ScrapeError>;
}
