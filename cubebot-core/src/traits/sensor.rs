//! Sensor port traits
//!
//! Incremental position counters, binary limit switches and the
//! elapsed-time bookkeeping used by autonomous phase gating.

use core::time::Duration;

/// Incremental position counter (quadrature encoder)
pub trait PositionCounter {
    /// Accumulated count since the last reset
    fn position(&mut self) -> i32;

    /// Count rate in counts per second
    fn rate(&mut self) -> f32;

    /// Zero the accumulated count
    fn reset(&mut self);
}

/// Binary limit switch
///
/// The lift's reed switches read active while open, so an inactive
/// reading means the carriage sits at that end of travel. Adapters for
/// switches wired the other way invert the level before reporting it.
pub trait LimitSwitch {
    /// Debounced switch level
    fn is_active(&mut self) -> bool;
}

/// Monotonic elapsed-time accumulator
///
/// Time is supplied by the caller on every operation, so the stopwatch
/// itself never reads a clock. While running, elapsed time grows with
/// `now`; stopping freezes it until the next start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stopwatch {
    /// Time accumulated across previous start/stop intervals
    accumulated: Duration,
    /// Start of the current interval, if running
    started_at: Option<Duration>,
}

impl Stopwatch {
    /// Create a stopped stopwatch reading zero
    pub const fn new() -> Self {
        Self {
            accumulated: Duration::ZERO,
            started_at: None,
        }
    }

    /// Start accumulating time; no-op if already running
    pub fn start(&mut self, now: Duration) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Stop accumulating time; no-op if already stopped
    pub fn stop(&mut self, now: Duration) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += now.saturating_sub(started);
        }
    }

    /// Zero the stopwatch and stop it
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Zero the stopwatch and start it at `now`
    pub fn restart(&mut self, now: Duration) {
        self.reset();
        self.start(now);
    }

    /// Check if the stopwatch is accumulating
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Total elapsed time as of `now`
    ///
    /// A `now` earlier than the start reads as no progress.
    pub fn elapsed(&self, now: Duration) -> Duration {
        match self.started_at {
            Some(started) => self.accumulated + now.saturating_sub(started),
            None => self.accumulated,
        }
    }
}
