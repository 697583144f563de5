use crate::network::core::Packet;
use crate::network::counters::traits::ThroughputSource;

/// Bytes added per packet for the Ethernet CRC, which buffers do not carry.
pub const CRC_LEN: u64 = 4;

/// Counts packets one by one as the pipeline hands them over.
#[derive(Debug, Default, Clone)]
pub struct PacketSource {
    current: u64,
    current_bytes: u64,
}

impl PacketSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one packet of `packet.size() + 4` bytes to the open interval.
    pub fn count_packet<P: Packet + ?Sized>(&mut self, packet: &P) {
        self.current = self.current.saturating_add(1);
        self.current_bytes = self
            .current_bytes
            .saturating_add((packet.size() as u64).saturating_add(CRC_LEN));
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn current_bytes(&self) -> u64 {
        self.current_bytes
    }
}

impl ThroughputSource for PacketSource {
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
    use crate::network::core::PacketData;

    #[test]
    fn test_counts_crc() {
        let mut source = PacketSource::new();
        source.count_packet(&PacketData::from(vec![0u8; 60]));
        source.count_packet(&vec![0u8; 1514]);

        assert_eq!(source.current(), 2);
        assert_eq!(source.current_bytes(), 64 + 1518);
    }

    #[test]
    fn test_throughput_drains() {
        let mut source = PacketSource::new();
        source.count_packet(&[0u8; 96][..]);

        assert_eq!(source.throughput(), (1, 100));
        assert_eq!(source.throughput(), (0, 0));
        assert_eq!(source.current(), 0);
    }
}
