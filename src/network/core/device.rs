//! Device contract consumed by device-backed counters.
//!
//! Hardware drivers live outside this crate. They expose their rx/tx
//! counter registers through [`Device`], with read-and-clear semantics:
//! every read returns what arrived since the previous read.

use log::debug;
use rand::Rng;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use crate::network::counters::Direction;

/// Per-port packet/byte counters.
pub trait Device: Send + Sync {
    /// Display name used in output lines, e.g. `Device: id 0`.
    fn name(&self) -> String;

    /// Packets and bytes received since the last rx read.
    fn rx_stats(&self) -> (u64, u64);

    /// Packets and bytes transmitted since the last tx read.
    fn tx_stats(&self) -> (u64, u64);

    /// Whether the device was brought up and can be metered.
    fn is_configured(&self) -> bool {
        true
    }

    /// Reads the counters for one direction.
    fn stats(&self, direction: Direction) -> (u64, u64) {
        match direction {
            Direction::Rx => self.rx_stats(),
            Direction::Tx => self.tx_stats(),
        }
    }
}

/// Fabricates line-rate-ish traffic for demos.
///
/// Each read returns packets proportional to the time since the previous
/// read in that direction, jittered by up to 10%.
pub struct SimulatedDevice {
    id: u16,
    mpps: f64,
    frame_size: u64,
    last_rx: Mutex<Instant>,
    last_tx: Mutex<Instant>,
}

impl SimulatedDevice {
    /// Creates a device that moves roughly `mpps` million frames of `frame_size`
    /// bytes (CRC excluded) per second in each direction.
    pub fn new(id: u16, mpps: f64, frame_size: u64) -> Self {
        let now = Instant::now();
        Self {
            id,
            mpps,
            frame_size,
            last_rx: Mutex::new(now),
            last_tx: Mutex::new(now),
        }
    }

    fn read(&self, last: &Mutex<Instant>) -> (u64, u64) {
        let mut last = last.lock().unwrap_or_else(PoisonError::into_inner);
        let elapsed = last.elapsed().as_secs_f64();
        *last = Instant::now();

        let jitter: f64 = rand::rng().random_range(0.9..=1.0);
        let packets = (elapsed * self.mpps * 1e6 * jitter) as u64;
        let bytes = packets * (self.frame_size + 4);
        debug!("{}: read {} packets over {:.3}s", self.name(), packets, elapsed);
        (packets, bytes)
    }
}

impl Device for SimulatedDevice {
    fn name(&self) -> String {
        format!("Device: id {}", self.id)
    }

    fn rx_stats(&self) -> (u64, u64) {
        self.read(&self.last_rx)
    }

    fn tx_stats(&self) -> (u64, u64) {
        self.read(&self.last_tx)
    }

    fn is_configured(&self) -> bool {
        self.mpps.is_finite() && self.mpps >= 0.0
    }
}

impl fmt::Debug for SimulatedDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedDevice")
            .field("id", &self.id)
            .field("mpps", &self.mpps)
            .field("frame_size", &self.frame_size)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Device that replays scripted register reads and then reports zero.
    #[derive(Default)]
    pub(crate) struct ScriptedDevice {
        pub rx: Mutex<VecDeque<(u64, u64)>>,
        pub tx: Mutex<VecDeque<(u64, u64)>>,
        pub broken: bool,
    }

    impl ScriptedDevice {
        pub fn new(rx: &[(u64, u64)], tx: &[(u64, u64)]) -> Self {
            Self {
                rx: Mutex::new(rx.iter().copied().collect()),
                tx: Mutex::new(tx.iter().copied().collect()),
                broken: false,
            }
        }
    }

    impl Device for ScriptedDevice {
        fn name(&self) -> String {
            "Device: id 7".to_string()
        }

        fn rx_stats(&self) -> (u64, u64) {
            self.rx.lock().unwrap().pop_front().unwrap_or((0, 0))
        }

        fn tx_stats(&self) -> (u64, u64) {
            self.tx.lock().unwrap().pop_front().unwrap_or((0, 0))
        }

        fn is_configured(&self) -> bool {
            !self.broken
        }
    }

    #[test]
    fn test_stats_dispatches_by_direction() {
        let dev = ScriptedDevice::new(&[(1, 64)], &[(2, 128)]);
        assert_eq!(dev.stats(Direction::Tx), (2, 128));
        assert_eq!(dev.stats(Direction::Rx), (1, 64));
        assert_eq!(dev.stats(Direction::Rx), (0, 0));
    }

    #[test]
    fn test_simulated_device_counts_crc() {
        let dev = SimulatedDevice::new(3, 1.0, 60);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let (packets, bytes) = dev.rx_stats();
        assert_eq!(bytes, packets * 64);
        assert_eq!(dev.name(), "Device: id 3");
        assert!(dev.is_configured());
        assert!(!SimulatedDevice::new(0, f64::NAN, 60).is_configured());
    }
}
