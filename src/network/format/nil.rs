use crate::error::Result;
use crate::network::core::OutputSink;
use crate::network::format::traits::{FinalEvent, Formatter, UpdateEvent};

/// Swallows every event. Used to silence a counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct NilFormatter;

impl Formatter for NilFormatter {
    fn name(&self) -> &str {
        "nil"
    }

    fn rx_init(&self, _sink: &OutputSink, _name: &str) -> Result<()> {
        Ok(())
    }

    fn rx_update(&self, _sink: &OutputSink, _event: &UpdateEvent<'_>) -> Result<()> {
        Ok(())
    }

    fn rx_final(&self, _sink: &OutputSink, _event: &FinalEvent<'_>) -> Result<()> {
        Ok(())
    }

    fn tx_init(&self, _sink: &OutputSink, _name: &str) -> Result<()> {
        Ok(())
    }

    fn tx_update(&self, _sink: &OutputSink, _event: &UpdateEvent<'_>) -> Result<()> {
        Ok(())
    }

    fn tx_final(&self, _sink: &OutputSink, _event: &FinalEvent<'_>) -> Result<()> {
        Ok(())
    }
}
