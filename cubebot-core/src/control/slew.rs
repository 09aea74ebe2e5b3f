//! Slew-rate limiting for operator axes

use crate::config::SlewLaw;

/// One step of the legacy slew law
///
/// Steps up by `max_step` when the target is more than `max_step` above
/// `current`; in every other case steps down by `max_step`. Only upward
/// moves are limited: a target at or below `current` produces a fixed
/// descent, and a target within `max_step` above `current` also steps
/// down, so the output bounces between one and two steps below a
/// resting input instead of settling on it.
pub fn slew_step(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta > max_step {
        current + max_step
    } else {
        current - max_step
    }
}

/// One step of the symmetric law: change clamped to `±max_step`
fn symmetric_step(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta > max_step {
        current + max_step
    } else if delta < -max_step {
        current - max_step
    } else {
        target
    }
}

/// Rate-of-change bound on one commanded value
///
/// Holds the previous output between ticks. Reset on every mode change
/// so a stale target is not carried across modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlewLimiter {
    /// Output of the previous tick
    value: f32,
    /// Largest change per tick
    max_step: f32,
    /// Step rule
    law: SlewLaw,
}

impl SlewLimiter {
    /// Create a limiter resting at zero
    pub const fn new(max_step: f32, law: SlewLaw) -> Self {
        Self {
            value: 0.0,
            max_step,
            law,
        }
    }

    /// Advance one tick toward `target` and return the new output
    pub fn next(&mut self, target: f32) -> f32 {
        self.value = match self.law {
            SlewLaw::Legacy => slew_step(self.value, target, self.max_step),
            SlewLaw::Symmetric => symmetric_step(self.value, target, self.max_step),
        };
        self.value
    }

    /// Current output
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Forget the previous output
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 0.05;

    #[test]
    fn test_legacy_limits_rise() {
        assert_eq!(slew_step(0.0, 1.0, STEP), 0.05);
        assert_eq!(slew_step(0.5, 1.0, 0.25), 0.75);
    }

    #[test]
    fn test_legacy_fixed_descent_regardless_of_target() {
        // Large and small drops both descend by exactly one step
        assert_eq!(slew_step(1.0, -1.0, 0.25), 0.75);
        assert_eq!(slew_step(1.0, 0.9, 0.25), 0.75);
    }

    #[test]
    fn test_legacy_steps_down_when_target_is_close_above() {
        // Target within one step above still steps down
        assert_eq!(slew_step(0.5, 0.5, 0.25), 0.25);
        assert_eq!(slew_step(0.5, 0.7, 0.25), 0.25);
    }

    #[test]
    fn test_legacy_dithers_at_rest() {
        let mut limiter = SlewLimiter::new(0.25, SlewLaw::Legacy);
        // Zero input never settles: the output bounces one to two steps
        // below the target
        assert_eq!(limiter.next(0.0), -0.25);
        assert_eq!(limiter.next(0.0), -0.5);
        assert_eq!(limiter.next(0.0), -0.25);
        assert_eq!(limiter.next(0.0), -0.5);
    }

    #[test]
    fn test_symmetric_settles_on_target() {
        let mut limiter = SlewLimiter::new(0.25, SlewLaw::Symmetric);
        assert_eq!(limiter.next(1.0), 0.25);
        assert_eq!(limiter.next(1.0), 0.5);
        assert_eq!(limiter.next(1.0), 0.75);
        assert_eq!(limiter.next(1.0), 1.0);
        assert_eq!(limiter.next(1.0), 1.0);
        assert_eq!(limiter.next(0.0), 0.75);
        assert_eq!(limiter.next(0.6), 0.6);
    }

    #[test]
    fn test_reset_clears_memory() {
        let mut limiter = SlewLimiter::new(0.25, SlewLaw::Symmetric);
        limiter.next(1.0);
        limiter.next(1.0);
        limiter.reset();
        assert_eq!(limiter.value(), 0.0);
        assert_eq!(limiter.next(1.0), 0.25);
    }
}
