//! Rate counter state machine shared by all acquisition strategies.
//!
//! A counter is created, sampled any number of times and finalized once.
//! Finalizing consumes the counter, so a finalized counter's samples can
//! no longer change.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::error::{MeterError, Result};
use crate::network::core::{Clock, Device, OutputSink, Packet, SystemClock};
use crate::network::counters::device::DeviceSource;
use crate::network::counters::manual::ManualSource;
use crate::network::counters::packet::PacketSource;
use crate::network::counters::traits::ThroughputSource;
use crate::network::counters::Direction;
use crate::network::format::{registry, FinalEvent, Formatter, UpdateEvent};
use crate::network::stats::{add_stats, SampleSeries};

/// Framing bytes each packet costs on the wire: preamble, SFD and inter-frame gap.
pub const FRAMING_OVERHEAD: f64 = 20.0;

/// Minimum seconds between two automatic samples.
pub const DEFAULT_MIN_INTERVAL: f64 = 1.0;

/// Samples collected so far, each with its summary attached, plus totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterStats {
    pub mpps: SampleSeries,
    pub mbit: SampleSeries,
    pub wire_mbit: SampleSeries,
    pub total: u64,
    pub total_bytes: u64,
}

/// Throughput counter for one direction of one traffic source.
pub struct Counter<S> {
    name: String,
    direction: Direction,
    source: S,
    formatter: Arc<dyn Formatter>,
    sink: OutputSink,
    clock: Arc<dyn Clock>,
    drain_delay: Duration,
    min_interval: f64,

    total: u64,
    total_bytes: u64,
    last_update: Option<f64>,

    mpps: SampleSeries,
    mbit: SampleSeries,
    wire_mbit: SampleSeries,
}

impl<S: ThroughputSource> Counter<S> {
    /// Builds a counter around `source`.
    ///
    /// The format is resolved first; an unknown name fails before any
    /// counter state exists. `sink` defaults to stdout.
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        source: S,
        format: &str,
        sink: Option<OutputSink>,
    ) -> Result<Self> {
        let formatter = registry::resolve(format)?;
        let drain_delay = source.default_drain_delay();

        Ok(Self {
            name: name.into(),
            direction,
            source,
            formatter,
            sink: sink.unwrap_or_else(OutputSink::stdout),
            clock: Arc::new(SystemClock::new()),
            drain_delay,
            min_interval: DEFAULT_MIN_INTERVAL,
            total: 0,
            total_bytes: 0,
            last_update: None,
            mpps: SampleSeries::new(),
            mbit: SampleSeries::new(),
            wire_mbit: SampleSeries::new(),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_drain_delay(mut self, delay: Duration) -> Self {
        self.drain_delay = delay;
        self
    }

    /// Sets the minimum seconds between automatic samples.
    pub fn with_min_interval(mut self, secs: f64) -> Self {
        self.min_interval = secs;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn last_update(&self) -> Option<f64> {
        self.last_update
    }

    /// True once the first sample has seeded the counter.
    pub fn is_initialized(&self) -> bool {
        self.last_update.is_some()
    }

    pub fn drain_delay(&self) -> Duration {
        self.drain_delay
    }

    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn mpps(&self) -> &SampleSeries {
        &self.mpps
    }

    pub fn mbit(&self) -> &SampleSeries {
        &self.mbit
    }

    pub fn wire_mbit(&self) -> &SampleSeries {
        &self.wire_mbit
    }

    /// Takes a sample if at least the minimum interval has passed since the last one.
    pub fn update(&mut self) -> Result<()> {
        let now = self.clock.now();
        if let Some(last) = self.last_update {
            if now - last < self.min_interval {
                return Ok(());
            }
        }

        let (packets, bytes) = self.source.throughput();
        self.update_counter(now, packets, bytes, false)
    }

    /// Folds one interval of `packets`/`bytes` observed up to `time` into the counter.
    ///
    /// The first call only seeds the totals and emits the init event. Later
    /// calls append one sample to each rate series and, unless `quiet`, emit
    /// an update event. An interval that did not advance the clock is
    /// counted in the totals but yields no sample.
    pub fn update_counter(&mut self, time: f64, packets: u64, bytes: u64, quiet: bool) -> Result<()> {
        let Some(last) = self.last_update else {
            self.total = packets;
            self.total_bytes = bytes;
            self.last_update = Some(time);
            debug!("[{}] {} seeded at {:.3}s", self.name, self.direction, time);
            return self.formatter.init(self.direction, &self.sink, &self.name);
        };

        self.total = self.total.saturating_add(packets);
        self.total_bytes = self.total_bytes.saturating_add(bytes);

        let elapsed = time - last;
        if elapsed <= 0.0 {
            debug!(
                "[{}] {} ignoring sample with {:.3}s elapsed",
                self.name, self.direction, elapsed
            );
            return Ok(());
        }
        self.last_update = Some(time);

        let mpps = packets as f64 / elapsed / 1e6;
        let mbit = bytes as f64 / elapsed / 1e6 * 8.0;
        let wire_mbit = mbit + mpps * FRAMING_OVERHEAD * 8.0;

        self.mpps.push(mpps);
        self.mbit.push(mbit);
        self.wire_mbit.push(wire_mbit);

        if quiet {
            return Ok(());
        }

        let event = UpdateEvent {
            name: &self.name,
            total: self.total,
            total_bytes: self.total_bytes,
            mpps,
            mbit,
            wire_mbit,
        };
        self.formatter.update(self.direction, &self.sink, &event)
    }

    /// Forces a quiet sample and returns every series with fresh summaries.
    pub fn get_stats(&mut self) -> Result<CounterStats> {
        self.sample_now()?;
        self.summarize();

        Ok(CounterStats {
            mpps: self.mpps.clone(),
            mbit: self.mbit.clone(),
            wire_mbit: self.wire_mbit.clone(),
            total: self.total,
            total_bytes: self.total_bytes,
        })
    }

    /// Ends the run for this counter.
    ///
    /// Waits for `drain` (or the counter's default drain delay), takes a last
    /// quiet sample, attaches the summaries, emits the final event and closes
    /// the sink if the counter owns it.
    ///
    /// The last sample follows the same rule as [`Counter::update_counter`]:
    /// if the clock has not moved since the previous sample (a zero drain
    /// delay right after an update), the drained counts land in the totals
    /// but no rate sample is appended.
    pub fn finalize(mut self, drain: Option<Duration>) -> Result<CounterStats> {
        self.clock.sleep(drain.unwrap_or(self.drain_delay));
        self.sample_now()?;
        self.summarize();

        let summary = |series: &SampleSeries| series.summary().copied().unwrap_or_default();
        let event = FinalEvent {
            name: &self.name,
            total: self.total,
            total_bytes: self.total_bytes,
            mpps: summary(&self.mpps),
            mbit: summary(&self.mbit),
            wire_mbit: summary(&self.wire_mbit),
        };
        self.formatter.finish(self.direction, &self.sink, &event)?;

        if self.sink.is_owned() {
            self.sink.close()?;
        }

        info!(
            "[{}] {} finalized: {} packets, {} bytes over {} samples",
            self.name,
            self.direction,
            self.total,
            self.total_bytes,
            self.mpps.len()
        );

        Ok(CounterStats {
            mpps: self.mpps,
            mbit: self.mbit,
            wire_mbit: self.wire_mbit,
            total: self.total,
            total_bytes: self.total_bytes,
        })
    }

    fn sample_now(&mut self) -> Result<()> {
        let (packets, bytes) = self.source.throughput();
        let now = self.clock.now();
        self.update_counter(now, packets, bytes, true)
    }

    fn summarize(&mut self) {
        add_stats(&mut self.mpps, true);
        add_stats(&mut self.mbit, true);
        add_stats(&mut self.wire_mbit, true);
    }
}

impl Counter<DeviceSource> {
    /// Meters one direction of `device`.
    ///
    /// Fails with [`MeterError::InvalidDevice`] for a device that is not
    /// configured. The registers are read once and discarded so the first
    /// interval starts from a clean baseline.
    pub fn device(
        device: Arc<dyn Device>,
        direction: Direction,
        format: &str,
        sink: Option<OutputSink>,
    ) -> Result<Self> {
        if !device.is_configured() {
            return Err(MeterError::InvalidDevice(device.name()));
        }

        let name = device.name();
        let mut counter = Self::new(name, direction, DeviceSource::new(device, direction), format, sink)?;
        counter.source.throughput();
        Ok(counter)
    }
}

impl Counter<PacketSource> {
    /// Counter fed through [`Counter::count_packet`].
    pub fn packet(
        name: impl Into<String>,
        direction: Direction,
        format: &str,
        sink: Option<OutputSink>,
    ) -> Result<Self> {
        Self::new(name, direction, PacketSource::new(), format, sink)
    }

    /// Counts one observed packet. Sampling happens on [`Counter::update`].
    pub fn count_packet<P: Packet + ?Sized>(&mut self, packet: &P) {
        self.source.count_packet(packet);
    }
}

impl Counter<ManualSource> {
    /// Counter fed with explicit packet and byte counts.
    pub fn manual(
        name: impl Into<String>,
        direction: Direction,
        format: &str,
        sink: Option<OutputSink>,
    ) -> Result<Self> {
        Self::new(name, direction, ManualSource::new(), format, sink)
    }

    /// Adds `packets`/`bytes` to the open interval, then samples if one is due.
    pub fn update_with(&mut self, packets: u64, bytes: u64) -> Result<()> {
        self.source.add(packets, bytes);
        self.update()
    }

    /// Like [`Counter::update_with`] for `packets` frames of `size` bytes plus CRC.
    pub fn update_with_size(&mut self, packets: u64, size: u64) -> Result<()> {
        self.source.add_with_size(packets, size);
        self.update()
    }
}
