// Interval timer
// Reports when a fixed threshold has passed since the last reset

use std::time::{Duration, Instant};

use super::clock::{SystemClock, TimeSource};

/// Elapsed-time threshold detector.
///
/// The timer is WAITING until `threshold` has passed since the last reset
/// and DUE from then on. Querying never resets it; only [`IntervalTimer::reset`]
/// brings it back to WAITING.
#[derive(Debug, Clone)]
pub struct IntervalTimer<C: TimeSource = SystemClock> {
    clock: C,
    threshold: Duration,
    reference: Instant,
}

impl IntervalTimer<SystemClock> {
    /// Create a wall-clock timer that comes due every `threshold_ms` milliseconds
    pub fn new(threshold_ms: u64) -> Self {
        Self::with_clock(Duration::from_millis(threshold_ms), SystemClock)
    }
}

impl<C: TimeSource> IntervalTimer<C> {
    /// Create a timer reading time from `clock`, starting now
    pub fn with_clock(threshold: Duration, clock: C) -> Self {
        let reference = clock.now();
        Self {
            clock,
            threshold,
            reference,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Time since the last reset (or construction)
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.reference)
    }

    /// True once at least `threshold` has elapsed since the last reset
    pub fn is_time_up(&self) -> bool {
        self.elapsed() >= self.threshold
    }

    /// Restart the measurement from the current instant
    pub fn reset(&mut self) {
        self.reference = self.clock.now();
    }
}
