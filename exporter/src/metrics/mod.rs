//! Metrics registry for the exporter.
//!
//! This module defines the four Prometheus gauges the scrape pipeline
//! maintains and the registry that renders them in the Prometheus text
//! format.
//!
//! Typical usage:
//!
//! ```ignore
//! use std::sync::Arc;
//! use exporter::metrics::MetricsRegistry;
//!
//! let registry = Arc::new(MetricsRegistry::new()?);
//! registry.set_highest_block(19_000_000.0);
//! let body = registry.export();
//! ```

pub mod prometheus;

pub use self::prometheus::{MetricsRegistry, NAMESPACE, NodeMetrics, VERSION_LABEL};
