//! Routine watchdog
//!
//! One clock per autonomous run. The routine deadline is an absolute
//! ceiling; per-phase ceilings are checked against the same clock, so a
//! stalled phase ends the whole routine instead of eating into the next
//! phase's time.

use core::time::Duration;

use super::status::AbortReason;
use crate::traits::Stopwatch;

/// Watchdog check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogStatus {
    /// Within every ceiling
    Ok,
    /// A ceiling was passed
    Expired(AbortReason),
}

/// Routine watchdog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Watchdog {
    clock: Stopwatch,
    deadline: Duration,
}

impl Watchdog {
    /// Create a disarmed watchdog
    pub const fn new() -> Self {
        Self {
            clock: Stopwatch::new(),
            deadline: Duration::ZERO,
        }
    }

    /// Start a fresh run with the given routine deadline
    pub fn arm(&mut self, now: Duration, deadline: Duration) {
        self.deadline = deadline;
        self.clock.restart(now);
    }

    /// Stop and zero the clock
    pub fn disarm(&mut self) {
        self.clock.reset();
    }

    /// Check if a run is being timed
    pub fn is_armed(&self) -> bool {
        self.clock.is_running()
    }

    /// Routine deadline of the current run
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Time since the run was armed
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.clock.elapsed(now)
    }

    /// Check the routine deadline, then the running phase's ceiling
    ///
    /// The deadline trips once elapsed time exceeds it; a phase ceiling
    /// trips once elapsed time reaches it.
    pub fn check(&self, now: Duration, phase_limit: Option<(u8, Duration)>) -> WatchdogStatus {
        let elapsed = self.elapsed(now);
        if elapsed > self.deadline {
            return WatchdogStatus::Expired(AbortReason::Deadline);
        }
        match phase_limit {
            Some((index, limit)) if elapsed >= limit => {
                WatchdogStatus::Expired(AbortReason::PhaseLimit(index))
            }
            _ => WatchdogStatus::Ok,
        }
    }
}
