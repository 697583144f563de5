use crate::network::counters::packet::CRC_LEN;
use crate::network::counters::traits::ThroughputSource;

/// Accumulates counts reported explicitly by the caller.
///
/// A single instance expects a single producer. Producers that share one
/// manual counter must wrap the counter in a lock.
#[derive(Debug, Default, Clone)]
pub struct ManualSource {
    current: u64,
    current_bytes: u64,
}

impl ManualSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, packets: u64, bytes: u64) {
        self.current = self.current.saturating_add(packets);
        self.current_bytes = self.current_bytes.saturating_add(bytes);
    }

    /// Adds `packets` frames of `size` bytes each, plus CRC.
    ///
    /// Counts saturate at `u64::MAX` instead of wrapping.
    pub fn add_with_size(&mut self, packets: u64, size: u64) {
        self.add(packets, packets.saturating_mul(size.saturating_add(CRC_LEN)));
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn current_bytes(&self) -> u64 {
        self.current_bytes
    }
}

impl ThroughputSource for ManualSource {
    fn throughput(&mut self) -> (u64, u64) {
        let drained = (self.current, self.current_bytes);
        self.current = 0;
        self.current_bytes = 0;
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_with_size() {
        let mut source = ManualSource::new();
        source.add_with_size(10, 64);
        assert_eq!(source.current(), 10);
        assert_eq!(source.current_bytes(), 680);
    }

    #[test]
    fn test_throughput_drains() {
        let mut source = ManualSource::new();
        source.add(3, 300);
        source.add(1, 100);
        assert_eq!(source.throughput(), (4, 400));
        assert_eq!(source.throughput(), (0, 0));
    }

    #[test]
    fn test_oversized_counts_saturate() {
        let mut source = ManualSource::new();
        source.add_with_size(u64::MAX / 2, 64);
        assert_eq!(source.current(), u64::MAX / 2);
        assert_eq!(source.current_bytes(), u64::MAX);

        source.add(u64::MAX, 1);
        assert_eq!(source.throughput(), (u64::MAX, u64::MAX));
    }
}
