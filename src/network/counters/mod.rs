//! Throughput counters.
//!
//! Every counter shares the same rate and statistics logic in [`Counter`]
//! and differs only in its [`ThroughputSource`]:
//!
//! * [`DeviceSource`] - reads a device's rx or tx registers
//! * [`PacketSource`] - counts packets handed over one at a time
//! * [`ManualSource`] - accumulates counts reported by the caller

use std::fmt;

pub mod counter;
pub mod device;
pub mod manual;
pub mod packet;
pub mod traits;

// Re-export counter types for convenience
pub use counter::{Counter, CounterStats, FRAMING_OVERHEAD};
pub use device::DeviceSource;
pub use manual::ManualSource;
pub use packet::PacketSource;
pub use traits::ThroughputSource;

/// Traffic direction a counter reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Rx,
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rx => write!(f, "RX"),
            Direction::Tx => write!(f, "TX"),
        }
    }
}

/// A counter reading a device's registers.
pub type DeviceCounter = Counter<DeviceSource>;

/// A counter fed one packet at a time.
pub type PacketCounter = Counter<PacketSource>;

/// A counter fed explicit counts.
pub type ManualCounter = Counter<ManualSource>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Rx.to_string(), "RX");
        assert_eq!(format!("{}", Direction::Tx), "TX");
    }
}
