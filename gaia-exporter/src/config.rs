//! Command-line configuration.
//!
//! The exporter takes exactly two flags; everything else is fixed. Flags
//! are converted into the library's [`ScrapeConfig`] once at startup.

use clap::Parser;

use exporter::{DEFAULT_NODE_URL, DEFAULT_PORT, ScrapeConfig};

/// Prometheus exporter for a Gaia node's RPC status and peers.
#[derive(Clone, Debug, Parser)]
#[command(name = "gaia-exporter", version, about)]
pub struct Cli {
    /// gaia-exporter port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Gaia RPC URL
    #[arg(long = "gaia-url", visible_alias = "gaiaUrl", default_value = DEFAULT_NODE_URL)]
    pub gaia_url: String,
}

impl From<Cli> for ScrapeConfig {
    fn from(cli: Cli) -> Self {
        ScrapeConfig::new(cli.gaia_url, cli.port)
    }
}
