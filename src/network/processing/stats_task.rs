use crate::error::Result;
use crate::network::core::{Clock, Device, OutputSink, SystemClock};
use crate::network::counters::{CounterStats, DeviceCounter, Direction};
use crate::settings::StatsOptions;
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Background sampler owning one counter per metered device direction.
///
/// All counters share the configured format and output destination. They
/// are sampled one after another on every pass, never under a common lock;
/// each counter's rate only depends on its own previous sample.
pub struct StatsTask {
    counters: Vec<DeviceCounter>,
    sink: OutputSink,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl StatsTask {
    /// Creates the rx and tx counters for the given devices.
    ///
    /// Devices in `devices` are metered in both directions. Rx counters are
    /// created first (rx-only devices, then `devices`), followed by the tx
    /// counters in the same manner. Construction fails on the first unknown
    /// format or unconfigured device and no counter survives.
    pub fn new(
        devices: &[Arc<dyn Device>],
        rx_devices: &[Arc<dyn Device>],
        tx_devices: &[Arc<dyn Device>],
        options: &StatsOptions,
    ) -> Result<Self> {
        Self::with_clock(
            devices,
            rx_devices,
            tx_devices,
            options,
            Arc::new(SystemClock::new()),
        )
    }

    /// Like [`StatsTask::new`] with an explicit time source.
    pub fn with_clock(
        devices: &[Arc<dyn Device>],
        rx_devices: &[Arc<dyn Device>],
        tx_devices: &[Arc<dyn Device>],
        options: &StatsOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let sink = OutputSink::open(options.output.as_deref())?;
        Self::with_sink(devices, rx_devices, tx_devices, options, sink, clock)
    }

    /// Builds the task around an already opened sink.
    ///
    /// Counters only borrow the sink. If `sink` is owned it is closed once
    /// after every counter has been finalized.
    pub fn with_sink(
        devices: &[Arc<dyn Device>],
        rx_devices: &[Arc<dyn Device>],
        tx_devices: &[Arc<dyn Device>],
        options: &StatsOptions,
        sink: OutputSink,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let rx_all = rx_devices.iter().chain(devices);
        let tx_all = tx_devices.iter().chain(devices);

        let plan = rx_all
            .map(|dev| (dev, Direction::Rx, options.rx_drain()))
            .chain(tx_all.map(|dev| (dev, Direction::Tx, options.tx_drain())));

        let mut counters = Vec::new();
        for (device, direction, drain) in plan {
            let counter = DeviceCounter::device(
                device.clone(),
                direction,
                &options.format,
                Some(sink.borrowed()),
            )?
            .with_clock(clock.clone())
            .with_drain_delay(drain)
            .with_min_interval(options.min_sample_secs);

            debug!("Created {} counter for {}", direction, counter.name());
            counters.push(counter);
        }

        Ok(Self {
            counters,
            sink,
            clock,
            interval: options.interval(),
        })
    }

    pub fn counters(&self) -> &[DeviceCounter] {
        &self.counters
    }

    /// Samples every counter until `running` turns false, then finalizes them.
    ///
    /// Returns the final statistics in counter construction order. Any
    /// failure while sampling ends the task with that error.
    pub fn run(mut self, running: &AtomicBool) -> Result<Vec<CounterStats>> {
        info!("Starting stats task with {} counters", self.counters.len());

        while running.load(Ordering::SeqCst) {
            for counter in &mut self.counters {
                counter.update()?;
            }
            self.clock.sleep_idle(self.interval);
        }

        info!("Stats task stopping, finalizing counters");

        let mut results = Vec::with_capacity(self.counters.len());
        for counter in self.counters {
            results.push(counter.finalize(None)?);
        }

        if self.sink.is_owned() {
            self.sink.close()?;
        }

        Ok(results)
    }

    /// Runs the task on a dedicated `stats` thread.
    pub fn spawn(self, running: Arc<AtomicBool>) -> Result<JoinHandle<Result<Vec<CounterStats>>>> {
        let handle = thread::Builder::new()
            .name("stats".to_string())
            .spawn(move || {
                let result = self.run(&running);
                if let Err(e) = &result {
                    error!("Stats task failed: {}", e);
                }
                result
            })?;

        Ok(handle)
    }
}
