//! Formatter contract.
//!
//! A formatter renders counter events to an [`OutputSink`]. There are six
//! events: init, update and final, each for rx and tx. Every event has a
//! default implementation that only logs a warning with the event payload, so
//! a formatter that cares about a subset of events implements just those and
//! the run continues for the rest.

use log::warn;

use crate::error::Result;
use crate::network::core::OutputSink;
use crate::network::counters::Direction;
use crate::network::stats::Summary;

/// Payload of an update event: the rates of the interval that just ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateEvent<'a> {
    pub name: &'a str,
    pub total: u64,
    pub total_bytes: u64,
    pub mpps: f64,
    pub mbit: f64,
    pub wire_mbit: f64,
}

/// Payload of the final event: run summaries plus cumulative totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalEvent<'a> {
    pub name: &'a str,
    pub total: u64,
    pub total_bytes: u64,
    pub mpps: Summary,
    pub mbit: Summary,
    pub wire_mbit: Summary,
}

/// Renders counter events.
///
/// # Example
///
/// ```rust
/// use pktmeter::network::format::{Formatter, UpdateEvent};
/// use pktmeter::network::core::OutputSink;
/// use pktmeter::Result;
///
/// struct RxOnly;
///
/// impl Formatter for RxOnly {
///     fn name(&self) -> &str {
///         "rx-only"
///     }
///
///     fn rx_update(&self, sink: &OutputSink, event: &UpdateEvent<'_>) -> Result<()> {
///         sink.write_line(&format!("{} {:.2}", event.name, event.mpps))
///     }
/// }
/// ```
pub trait Formatter: Send + Sync {
    /// Returns the name this formatter reports in diagnostics
    fn name(&self) -> &str;

    fn rx_init(&self, _sink: &OutputSink, name: &str) -> Result<()> {
        missing_handler(self.name(), "rx_init", &name);
        Ok(())
    }

    fn rx_update(&self, _sink: &OutputSink, event: &UpdateEvent<'_>) -> Result<()> {
        missing_handler(self.name(), "rx_update", event);
        Ok(())
    }

    fn rx_final(&self, _sink: &OutputSink, event: &FinalEvent<'_>) -> Result<()> {
        missing_handler(self.name(), "rx_final", event);
        Ok(())
    }

    fn tx_init(&self, _sink: &OutputSink, name: &str) -> Result<()> {
        missing_handler(self.name(), "tx_init", &name);
        Ok(())
    }

    fn tx_update(&self, _sink: &OutputSink, event: &UpdateEvent<'_>) -> Result<()> {
        missing_handler(self.name(), "tx_update", event);
        Ok(())
    }

    fn tx_final(&self, _sink: &OutputSink, event: &FinalEvent<'_>) -> Result<()> {
        missing_handler(self.name(), "tx_final", event);
        Ok(())
    }

    /// Dispatches the init event for `direction`.
    fn init(&self, direction: Direction, sink: &OutputSink, name: &str) -> Result<()> {
        match direction {
            Direction::Rx => self.rx_init(sink, name),
            Direction::Tx => self.tx_init(sink, name),
        }
    }

    /// Dispatches the update event for `direction`.
    fn update(&self, direction: Direction, sink: &OutputSink, event: &UpdateEvent<'_>) -> Result<()> {
        match direction {
            Direction::Rx => self.rx_update(sink, event),
            Direction::Tx => self.tx_update(sink, event),
        }
    }

    /// Dispatches the final event for `direction`.
    fn finish(&self, direction: Direction, sink: &OutputSink, event: &FinalEvent<'_>) -> Result<()> {
        match direction {
            Direction::Rx => self.rx_final(sink, event),
            Direction::Tx => self.tx_final(sink, event),
        }
    }
}

fn missing_handler(format: &str, event: &str, args: &dyn std::fmt::Debug) {
    warn!("Format '{}' has no {} handler, event: {:?}", format, event, args);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::core::CaptureBuffer;

    struct TxUpdatesOnly;

    impl Formatter for TxUpdatesOnly {
        fn name(&self) -> &str {
            "tx-updates"
        }

        fn tx_update(&self, sink: &OutputSink, event: &UpdateEvent<'_>) -> Result<()> {
            sink.write_line(&format!("{} {}", event.name, event.total))
        }
    }

    #[test]
    fn test_missing_handlers_do_not_fail() {
        let buffer = CaptureBuffer::new();
        let sink = OutputSink::from_writer("memory", buffer.clone());
        let event = UpdateEvent {
            name: "port",
            total: 42,
            total_bytes: 4200,
            mpps: 1.0,
            mbit: 2.0,
            wire_mbit: 3.0,
        };

        TxUpdatesOnly.init(Direction::Rx, &sink, "port").unwrap();
        TxUpdatesOnly.update(Direction::Rx, &sink, &event).unwrap();
        TxUpdatesOnly.update(Direction::Tx, &sink, &event).unwrap();

        assert_eq!(buffer.lines(), vec!["port 42"]);
    }
}
