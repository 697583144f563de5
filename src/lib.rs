//! # pktmeter - Throughput metering for packet pipelines
//!
//! pktmeter periodically samples packet and byte counters, derives
//! throughput rates and summarizes them when the run ends.
//!
//! ## Features
//!
//! * Device counters - read a NIC's rx/tx registers through the [`Device`](network::core::Device) trait
//! * Packet counters - count packets one by one as the pipeline sees them
//! * Manual counters - report packet and byte counts explicitly
//! * Run statistics - average, standard deviation, median and sum of every rate
//! * Pluggable output - `plain`, `CSV` and `nil` formats plus custom ones
//!
//! ## Architecture
//!
//! Each [`Counter`](network::counters::Counter) owns the rate and statistics
//! logic and delegates only the acquisition of raw counts to a
//! [`ThroughputSource`](network::counters::ThroughputSource). A
//! [`StatsTask`](network::processing::StatsTask) drives device counters on a
//! background thread until the shared running flag is cleared.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pktmeter::prelude::*;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! # fn main() -> pktmeter::Result<()> {
//! let device: Arc<dyn Device> = Arc::new(SimulatedDevice::new(0, 14.88, 60));
//! let options = SettingsBuilder::new().format("plain").build();
//!
//! let running = Arc::new(AtomicBool::new(true));
//! let task = StatsTask::new(&[device], &[], &[], &options)?;
//! let handle = task.spawn(running.clone())?;
//!
//! std::thread::sleep(std::time::Duration::from_secs(5));
//! running.store(false, Ordering::SeqCst);
//! # let _ = handle.join();
//! # Ok(())
//! # }
//! ```

/// Centralized error handling
pub mod error;
/// Counters, formatters, statistics and the sampling task
pub mod network;
/// Prelude for convenient imports
pub mod prelude;
/// Configuration settings for the sampler
pub mod settings;

// Re-export commonly used types
pub use error::{MeterError, Result};
