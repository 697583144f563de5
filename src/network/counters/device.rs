use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::network::core::Device;
use crate::network::counters::traits::ThroughputSource;
use crate::network::counters::Direction;

/// Drain delay for receive counters: traffic may still be on the wire.
pub const RX_DRAIN_DELAY: Duration = Duration::from_millis(100);

/// Drain delay for transmit counters, which track the NIC's own completions.
pub const TX_DRAIN_DELAY: Duration = Duration::from_millis(50);

/// Reads one direction of a device's counter registers.
#[derive(Clone)]
pub struct DeviceSource {
    device: Arc<dyn Device>,
    direction: Direction,
}

impl DeviceSource {
    pub fn new(device: Arc<dyn Device>, direction: Direction) -> Self {
        Self { device, direction }
    }

    pub fn device(&self) -> &Arc<dyn Device> {
        &self.device
    }
}

impl ThroughputSource for DeviceSource {
    fn throughput(&mut self) -> (u64, u64) {
        self.device.stats(self.direction)
    }

    fn default_drain_delay(&self) -> Duration {
        match self.direction {
            Direction::Rx => RX_DRAIN_DELAY,
            Direction::Tx => TX_DRAIN_DELAY,
        }
    }
}

impl fmt::Debug for DeviceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSource")
            .field("device", &self.device.name())
            .field("direction", &self.direction)
            .finish()
    }
}
