//! Per-process exporter configuration.
//!
//! A [`ScrapeConfig`] is built once at startup (from CLI flags in the
//! binary, or from [`Default`]) and is read-only afterwards. It carries
//! the two knobs the exporter has:
//!
//! - the base URL of the monitored node's RPC server,
//! - the port the `/metrics` and `/health` endpoints listen on.

use std::net::{Ipv4Addr, SocketAddr};

/// Default RPC address of a locally running Gaia node.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:26657";

/// Default port for the exporter's own HTTP server.
pub const DEFAULT_PORT: u16 = 4000;

/// Immutable settings shared by the node client and the HTTP server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Base URL of the node RPC server, e.g. `"http://127.0.0.1:26657"`.
    pub node_url: String,
    /// Port to bind the exporter HTTP server to, on all interfaces.
    pub port: u16,
}

impl ScrapeConfig {
    pub fn new(node_url: impl Into<String>, port: u16) -> Self {
        Self {
            node_url: node_url.into(),
            port,
        }
    }

    /// Address the exporter binds to: every IPv4 interface on [`Self::port`].
    ///
    /// IPv4 only, so binding also works on hosts with IPv6 disabled.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Joins the node base URL and an RPC path.
    pub fn endpoint(&self, path: &str) -> String {
        // Avoid accidental double slashes.
        format!(
            "{}/{}",
            self.node_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_URL, DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_node() {
        let cfg = ScrapeConfig::default();
        assert_eq!(cfg.node_url, "http://127.0.0.1:26657");
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.listen_addr().to_string(), "0.0.0.0:4000");
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let cfg = ScrapeConfig::new("http://node:26657/", 9100);
        assert_eq!(cfg.endpoint("/status"), "http://node:26657/status");
        assert_eq!(cfg.endpoint("net_info"), "http://node:26657/net_info");
    }
}
