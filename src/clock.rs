//! Clock abstraction driving the wall-clock step loop

use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic wall-clock time for the step loop.
///
/// Results must stay independent of the achieved frame rate, so the
/// integrator reads elapsed wall time from this seam instead of counting
/// steps. Tests drive a [`ManualClock`] deterministically.
pub trait Clock {
    /// Seconds since an arbitrary epoch fixed at clock creation
    fn now(&self) -> f64;
}

/// Monotonic system clock
#[derive(Debug)]
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
}

/// Manually advanced clock for deterministic tests and offline runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `dt` seconds
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }

    /// Jump the clock to an absolute time in seconds
    pub fn set(&self, now: f64) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), 0.0);
        clock.advance(0.5);
        clock.advance(0.25);
        assert!((clock.now() - 0.75).abs() < 1e-12);
        clock.set(10.0);
        assert_eq!(clock.now(), 10.0);
    }

    #[test]
    fn test_system_clock_is_monotone() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
