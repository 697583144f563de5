use crate::error::Result;
use crate::network::core::OutputSink;
use crate::network::counters::Direction;
use crate::network::format::traits::{FinalEvent, Formatter, UpdateEvent};

const CYAN: &str = "\x1b[0;36m";
const BLUE: &str = "\x1b[0;34m";
const RESET: &str = "\x1b[0m";

/// Human-readable one-line-per-event output.
///
/// ```text
/// [Device: id 0] RX: 14.88 Mpps, 7618 Mbit/s (10000 Mbit/s with framing)
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainFormatter;

impl PlainFormatter {
    fn colorize(sink: &OutputSink, direction: Direction, line: String) -> String {
        if !sink.supports_color() {
            return line;
        }

        let color = match direction {
            Direction::Rx => CYAN,
            Direction::Tx => BLUE,
        };
        format!("{}{}{}", color, line, RESET)
    }

    fn write_update(sink: &OutputSink, direction: Direction, event: &UpdateEvent<'_>) -> Result<()> {
        let line = format!(
            "[{}] {}: {:.2} Mpps, {:.0} Mbit/s ({:.0} Mbit/s with framing)",
            event.name, direction, event.mpps, event.mbit, event.wire_mbit
        );
        sink.write_line(&Self::colorize(sink, direction, line))
    }

    fn write_final(sink: &OutputSink, direction: Direction, event: &FinalEvent<'_>) -> Result<()> {
        let line = format!(
            "[{}] {}: {:.2} (StdDev {:.2}) Mpps, {:.0} (StdDev {:.0}) Mbit/s ({:.0} Mbit/s with framing), total {} packets with {} bytes (incl. CRC)",
            event.name,
            direction,
            event.mpps.avg,
            event.mpps.std_dev,
            event.mbit.avg,
            event.mbit.std_dev,
            event.wire_mbit.avg,
            event.total,
            event.total_bytes
        );
        sink.write_line(&Self::colorize(sink, direction, line))
    }
}

impl Formatter for PlainFormatter {
    fn name(&self) -> &str {
        "plain"
    }

    // Headers are only meaningful for machine-readable formats
    fn rx_init(&self, _sink: &OutputSink, _name: &str) -> Result<()> {
        Ok(())
    }

    fn rx_update(&self, sink: &OutputSink, event: &UpdateEvent<'_>) -> Result<()> {
        Self::write_update(sink, Direction::Rx, event)
    }

    fn rx_final(&self, sink: &OutputSink, event: &FinalEvent<'_>) -> Result<()> {
        Self::write_final(sink, Direction::Rx, event)
    }

    fn tx_init(&self, _sink: &OutputSink, _name: &str) -> Result<()> {
        Ok(())
    }

    fn tx_update(&self, sink: &OutputSink, event: &UpdateEvent<'_>) -> Result<()> {
        Self::write_update(sink, Direction::Tx, event)
    }

    fn tx_final(&self, sink: &OutputSink, event: &FinalEvent<'_>) -> Result<()> {
        Self::write_final(sink, Direction::Tx, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::core::CaptureBuffer;
    use crate::network::stats::Summary;

    fn update_event() -> UpdateEvent<'static> {
        UpdateEvent {
            name: "Device: id 0",
            total: 1_000_000,
            total_bytes: 800_000_000,
            mpps: 1.0,
            mbit: 6400.0,
            wire_mbit: 6560.0,
        }
    }

    #[test]
    fn test_update_line() {
        let buffer = CaptureBuffer::new();
        let sink = OutputSink::from_writer("memory", buffer.clone());

        PlainFormatter.rx_update(&sink, &update_event()).unwrap();
        PlainFormatter.tx_update(&sink, &update_event()).unwrap();

        assert_eq!(
            buffer.lines(),
            vec![
                "[Device: id 0] RX: 1.00 Mpps, 6400 Mbit/s (6560 Mbit/s with framing)",
                "[Device: id 0] TX: 1.00 Mpps, 6400 Mbit/s (6560 Mbit/s with framing)",
            ]
        );
    }

    #[test]
    fn test_update_line_colored_by_direction() {
        let buffer = CaptureBuffer::new();
        let sink = OutputSink::from_writer("tty", buffer.clone()).with_color(true);

        PlainFormatter.rx_update(&sink, &update_event()).unwrap();
        PlainFormatter.tx_update(&sink, &update_event()).unwrap();

        let lines = buffer.lines();
        assert!(lines[0].starts_with(CYAN) && lines[0].ends_with(RESET));
        assert!(lines[1].starts_with(BLUE) && lines[1].ends_with(RESET));
    }

    #[test]
    fn test_final_line() {
        let buffer = CaptureBuffer::new();
        let sink = OutputSink::from_writer("memory", buffer.clone());
        let summary = |avg: f64, std_dev: f64| Summary {
            avg,
            std_dev,
            median: avg,
            sum: avg * 3.0,
        };

        let event = FinalEvent {
            name: "port",
            total: 3_000_000,
            total_bytes: 192_000_000,
            mpps: summary(1.0, 0.05),
            mbit: summary(512.0, 12.4),
            wire_mbit: summary(672.0, 14.0),
        };
        PlainFormatter.tx_final(&sink, &event).unwrap();

        assert_eq!(
            buffer.contents(),
            "[port] TX: 1.00 (StdDev 0.05) Mpps, 512 (StdDev 12) Mbit/s (672 Mbit/s with framing), total 3000000 packets with 192000000 bytes (incl. CRC)\n"
        );
    }

    #[test]
    fn test_init_writes_nothing() {
        let buffer = CaptureBuffer::new();
        let sink = OutputSink::from_writer("memory", buffer.clone());
        PlainFormatter.rx_init(&sink, "port").unwrap();
        PlainFormatter.tx_init(&sink, "port").unwrap();
        assert!(buffer.contents().is_empty());
    }
}
