//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types and traits from the crate,
//! allowing users to import everything they need with a single use statement:
//!
//! ```rust
//! use pktmeter::prelude::*;
//! ```

// Error handling
pub use crate::error::{MeterError, Result};

// Collaborators
pub use crate::network::core::{
    Clock, Device, ManualClock, OutputSink, Packet, PacketData, SimulatedDevice, SystemClock,
};

// Counters
pub use crate::network::counters::{
    Counter, CounterStats, DeviceCounter, Direction, ManualCounter, PacketCounter,
    ThroughputSource,
};

// Formatters
pub use crate::network::format::{FinalEvent, Formatter, UpdateEvent};

// Statistics
pub use crate::network::stats::{SampleSeries, Summary};

// Sampling task
pub use crate::network::processing::StatsTask;

// Settings
pub use crate::settings::{SettingsBuilder, StatsOptions};
