use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::network::format::DEFAULT_FORMAT;

#[derive(Parser, Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StatsOptions {
    /// Output format: plain, CSV, nil or any registered format
    #[arg(long = "format", id = "format", default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// File to write stats to (default: stdout)
    #[arg(long = "output", id = "output")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Wait before the final rx sample in milliseconds
    #[arg(long = "rx-drain-ms", id = "rx-drain-ms", default_value_t = 100)]
    pub rx_drain_ms: u64,

    /// Wait before the final tx sample in milliseconds
    #[arg(long = "tx-drain-ms", id = "tx-drain-ms", default_value_t = 50)]
    pub tx_drain_ms: u64,

    /// Idle time between sampling passes in milliseconds
    #[arg(long = "interval-ms", id = "interval-ms", default_value_t = 100)]
    pub interval_ms: u64,

    /// Minimum seconds between two samples of the same counter
    #[arg(long = "min-sample-secs", id = "min-sample-secs", default_value_t = 1.0)]
    pub min_sample_secs: f64,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            output: None,
            rx_drain_ms: 100,
            tx_drain_ms: 50,
            interval_ms: 100,
            min_sample_secs: 1.0,
        }
    }
}

impl StatsOptions {
    pub fn rx_drain(&self) -> Duration {
        Duration::from_millis(self.rx_drain_ms)
    }

    pub fn tx_drain(&self) -> Duration {
        Duration::from_millis(self.tx_drain_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_default() {
        let parsed = StatsOptions::parse_from(["pktmeter"]);
        assert_eq!(parsed, StatsOptions::default());
        assert_eq!(parsed.rx_drain(), Duration::from_millis(100));
        assert_eq!(parsed.tx_drain(), Duration::from_millis(50));
    }

    #[test]
    fn test_cli_overrides() {
        let parsed = StatsOptions::parse_from([
            "pktmeter",
            "--format",
            "nil",
            "--output",
            "/tmp/stats.txt",
            "--interval-ms",
            "250",
        ]);
        assert_eq!(parsed.format, "nil");
        assert_eq!(parsed.output, Some(PathBuf::from("/tmp/stats.txt")));
        assert_eq!(parsed.interval(), Duration::from_millis(250));
    }
}
