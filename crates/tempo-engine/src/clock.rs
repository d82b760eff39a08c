//! Monotonic clock sources for the time engine
//!
//! The engine never reads the wall clock. All settlement is driven by a
//! `MonotonicClock`, which reports elapsed time from a fixed per-source epoch
//! and is immune to system clock adjustments.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A monotonic time source
///
/// `now()` returns the offset from an arbitrary epoch fixed at construction.
/// Successive readings never decrease.
pub trait MonotonicClock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Production clock source backed by `std::time::Instant`
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven clock source for deterministic tests
///
/// Time only moves when `advance` or `set` is called, so tests can assert
/// exact settlement arithmetic without sleeping.
#[derive(Clone, Default)]
pub struct ManualClock {
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `d`
    pub fn advance(&self, d: Duration) {
        let mut offset = self.offset.lock();
        *offset += d;
    }

    /// Set the absolute offset. Panics if this would move time backward.
    pub fn set(&self, d: Duration) {
        let mut offset = self.offset.lock();
        assert!(d >= *offset, "manual clock must not move backward");
        *offset = d;
    }
}

impl MonotonicClock for ManualClock {
    fn now(&self) -> Duration {
        *self.offset.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        let t2 = clock.now();
        assert!(t2 > t1);
    }

    #[test]
    fn test_manual_clock_advances_only_by_hand() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(250));

        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    #[should_panic(expected = "must not move backward")]
    fn test_manual_clock_rejects_backward_set() {
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(2));
        clock.set(Duration::from_secs(1));
    }
}
