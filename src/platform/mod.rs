//! Platform abstraction layer
//!
//! The simulation never reads time itself; the host supplies millisecond
//! timestamps through a [`Clock`]. [`SystemClock`] backs the real game loop,
//! [`ManualClock`] drives scripted time in tests and tools.

use std::cell::Cell;
use std::time::Instant;

/// Source of monotonically non-decreasing millisecond timestamps.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock anchored at construction time.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-advanced clock for deterministic timelines.
#[derive(Debug, Default)]
pub struct ManualClock {
    ms: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            ms: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.ms.set(self.ms.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms.get()
    }
}
