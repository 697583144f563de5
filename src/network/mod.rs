//! Throughput metering for packet-processing pipelines.
//!
//! This module contains the collaborator contracts, the statistics helpers,
//! the output formatters, the rate counters and the background sampler.

pub mod core;
pub mod counters;
pub mod format;
pub mod processing;
pub mod stats;
