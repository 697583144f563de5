//! Time source for the sampling loop.
//!
//! Counters never read the wall clock directly. They ask a [`Clock`] for a
//! monotonic timestamp in seconds and use it to sleep, so tests can drive a
//! whole run with [`ManualClock`] without blocking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Monotonic time plus the two blocking primitives the sampler needs.
pub trait Clock: Send + Sync {
    /// Seconds since an arbitrary fixed origin.
    fn now(&self) -> f64;

    /// Blocks the caller for `duration`.
    fn sleep(&self, duration: Duration);

    /// Sleep used between sampling passes, where other work may run.
    fn sleep_idle(&self, duration: Duration) {
        self.sleep(duration);
    }
}

/// Real clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }

    fn sleep_idle(&self, duration: Duration) {
        thread::yield_now();
        thread::sleep(duration);
    }
}

/// Virtual clock for deterministic runs. Sleeping advances time instantly.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock already positioned at `secs`.
    pub fn at(secs: f64) -> Self {
        let clock = Self::new();
        clock.set(secs);
        clock
    }

    pub fn set(&self, secs: f64) {
        self.nanos
            .store(Duration::from_secs_f64(secs).as_nanos() as u64, Ordering::SeqCst);
    }

    pub fn advance(&self, duration: Duration) {
        self.nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst)).as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
