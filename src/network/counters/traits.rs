use std::time::Duration;

/// How a counter obtains the raw packet and byte counts of one interval.
///
/// Implementations return what was observed since the previous call and
/// start the next interval from zero. The counter accumulates the returned
/// deltas into its cumulative totals.
pub trait ThroughputSource: Send {
    /// Drains the packets and bytes observed since the last call.
    fn throughput(&mut self) -> (u64, u64);

    /// Pause before the final sample so in-flight traffic is still counted.
    fn default_drain_delay(&self) -> Duration {
        Duration::ZERO
    }
}

impl<T: ThroughputSource + ?Sized> ThroughputSource for Box<T> {
    fn throughput(&mut self) -> (u64, u64) {
        (**self).throughput()
    }

    fn default_drain_delay(&self) -> Duration {
        (**self).default_drain_delay()
    }
}
