//! Stats settings builder.
//!
//! This module provides a fluent builder API for constructing
//! `StatsOptions` without going through the command line.
//!
//! # Example
//!
//! ```rust
//! use pktmeter::settings::SettingsBuilder;
//!
//! let options = SettingsBuilder::new()
//!     .format("nil")
//!     .interval_ms(50)
//!     .drain_ms(0, 0)
//!     .build();
//! assert_eq!(options.format, "nil");
//! ```

use std::path::PathBuf;

use crate::settings::stats::StatsOptions;

/// Builder for constructing `StatsOptions`.
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    options: StatsOptions,
}

impl SettingsBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output format by name.
    pub fn format(mut self, format: &str) -> Self {
        self.options.format = format.to_string();
        self
    }

    /// Writes stats to `path` instead of stdout.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = Some(path.into());
        self
    }

    /// Sets the rx and tx drain delays in milliseconds.
    pub fn drain_ms(mut self, rx_ms: u64, tx_ms: u64) -> Self {
        self.options.rx_drain_ms = rx_ms;
        self.options.tx_drain_ms = tx_ms;
        self
    }

    /// Sets the idle time between sampling passes.
    pub fn interval_ms(mut self, interval_ms: u64) -> Self {
        self.options.interval_ms = interval_ms;
        self
    }

    /// Sets the minimum seconds between two samples of one counter.
    pub fn min_sample_secs(mut self, secs: f64) -> Self {
        self.options.min_sample_secs = secs;
        self
    }

    /// Builds the final `StatsOptions`.
    pub fn build(self) -> StatsOptions {
        self.options
    }
}
