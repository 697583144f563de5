use std::time::Instant;

/// Anything whose on-wire length (excluding CRC) can be counted.
pub trait Packet {
    /// Returns the size of the packet in bytes
    fn size(&self) -> usize;
}

impl Packet for [u8] {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Packet for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}

/// Represents an observed packet with its capture time.
///
/// Pipelines that hand owned buffers to a packet counter can wrap them
/// here to keep the arrival timestamp next to the payload.
#[derive(Debug, Clone)]
pub struct PacketData {
    /// Raw frame bytes, CRC not included
    pub data: Vec<u8>,

    /// Timestamp when the packet was captured
    pub arrival_time: Instant,
}

impl From<Vec<u8>> for PacketData {
    /// Creates a PacketData instance from a raw buffer,
    /// automatically recording the current time as arrival time.
    fn from(data: Vec<u8>) -> Self {
        PacketData {
            data,
            arrival_time: Instant::now(),
        }
    }
}

impl PacketData {
    /// Returns the time elapsed since the packet was captured
    pub fn age(&self) -> std::time::Duration {
        self.arrival_time.elapsed()
    }
}

impl Packet for PacketData {
    fn size(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_data_creation() {
        let packet_data = PacketData::from(vec![1, 2, 3, 4]);

        assert_eq!(packet_data.data[..], [1, 2, 3, 4]);
        assert_eq!(packet_data.size(), 4);

        // Verify that the arrival time is recent
        assert!(packet_data.age().as_secs() < 1);
    }

    #[test]
    fn test_raw_buffers_are_packets() {
        let buf = vec![0u8; 60];
        assert_eq!(buf.size(), 60);
        assert_eq!(buf[..10].size(), 10);
    }
}
