//! Tick timing
//!
//! [`IntervalTimer`] answers "has the interval passed yet?" against a
//! pluggable [`TimeSource`]. The frame loop polls it once per tick.

pub mod clock;
pub mod interval;

pub use clock::{ManualClock, SystemClock, TimeSource};
pub use interval::IntervalTimer;
