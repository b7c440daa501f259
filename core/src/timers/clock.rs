//! Time sources for cooldown comparisons
//!
//! A timer never reads the system clock directly. It asks a [`Clock`] for the
//! current reading in whichever [`TimeBasis`] it is configured with, so hosts
//! can share one clock between their loop and every timer they own.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tickgate_types::TimeBasis;

/// Source of tick and wall-clock readings.
pub trait Clock {
    /// Current host tick (non-decreasing)
    fn ticks(&self) -> u64;

    /// Wall-clock milliseconds since the clock's epoch
    fn millis(&self) -> u64;

    /// Reading in the unit selected by `basis`
    fn now(&self, basis: TimeBasis) -> u64 {
        match basis {
            TimeBasis::Ticks => self.ticks(),
            TimeBasis::WallClock => self.millis(),
        }
    }
}

/// Clock handle shared between a host and its timers
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

// ═══════════════════════════════════════════════════════════════════════════
// Host Clock
// ═══════════════════════════════════════════════════════════════════════════

/// Clock driven by a host polling loop.
///
/// Ticks only move when the host calls [`HostClock::advance`]; milliseconds
/// are measured from the moment the clock was created.
#[derive(Debug)]
pub struct HostClock {
    ticks: AtomicU64,
    started: Instant,
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Advance one tick, returning the new tick count
    pub fn advance(&self) -> u64 {
        self.advance_by(1)
    }

    /// Advance `n` ticks, returning the new tick count
    pub fn advance_by(&self, n: u64) -> u64 {
        self.ticks.fetch_add(n, Ordering::Relaxed) + n
    }
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for HostClock {
    fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    fn millis(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Manual Clock
// ═══════════════════════════════════════════════════════════════════════════

/// Clock whose readings are set explicitly (tests, replays).
#[derive(Debug, Default)]
pub struct ManualClock {
    ticks: AtomicU64,
    millis: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(ticks: u64, millis: u64) -> Self {
        Self {
            ticks: AtomicU64::new(ticks),
            millis: AtomicU64::new(millis),
        }
    }

    pub fn set_ticks(&self, ticks: u64) {
        self.ticks.store(ticks, Ordering::Relaxed);
    }

    pub fn set_millis(&self, millis: u64) {
        self.millis.store(millis, Ordering::Relaxed);
    }

    pub fn advance_ticks(&self, n: u64) -> u64 {
        self.ticks.fetch_add(n, Ordering::Relaxed) + n
    }

    pub fn advance_millis(&self, n: u64) -> u64 {
        self.millis.fetch_add(n, Ordering::Relaxed) + n
    }
}

impl Clock for ManualClock {
    fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    fn millis(&self) -> u64 {
        self.millis.load(Ordering::Relaxed)
    }
}
