//! Lift control
//!
//! The lift runs open loop between two reed switches. The encoder is
//! re-zeroed whenever the carriage sits on the bottom switch, and two
//! soft limits inside the switch-bound range slow the motor near either
//! end so it does not slam into the hard stops.

use crate::config::LiftConfig;
use crate::traits::{CounterId, Hardware, SwitchId};

/// Lift control
#[derive(Debug, Clone)]
pub struct LiftControl {
    config: LiftConfig,
}

impl LiftControl {
    /// Create lift control from configuration
    pub fn new(config: LiftConfig) -> Self {
        Self { config }
    }

    /// Re-zero the lift counter while the carriage is home
    ///
    /// Returns true if the counter was zeroed this tick. An inactive
    /// bottom switch means the carriage is on it.
    pub fn home<H: Hardware + ?Sized>(&self, hw: &mut H) -> bool {
        let at_bottom = !hw.switch(SwitchId::LiftBottom).is_active();
        if at_bottom {
            hw.counter(CounterId::Lift).reset();
        }
        at_bottom
    }

    /// Check if the top switch allows raising
    pub fn top_clear<H: Hardware + ?Sized>(&self, hw: &mut H) -> bool {
        hw.switch(SwitchId::LiftTop).is_active()
    }

    /// Resolve operator requests into a lift speed
    ///
    /// Rules are checked in order; the first match wins:
    /// 1. raise, top clear, at or above the high soft limit: creep up
    /// 2. raise, top clear: full raise
    /// 3. lower, at or below the low soft limit: creep down
    /// 4. lower: fast lower
    /// 5. hold
    ///
    /// A raise request against a closed top switch falls through to the
    /// lower rules.
    pub fn command(&self, raise: bool, lower: bool, position: i32, top_clear: bool) -> f32 {
        let c = &self.config;
        if raise && top_clear && position >= c.high_soft_limit {
            c.creep_raise_speed
        } else if raise && top_clear {
            c.raise_speed
        } else if lower && position <= c.low_soft_limit {
            -c.creep_lower_speed
        } else if lower {
            -c.lower_speed
        } else {
            0.0
        }
    }

    /// Home, then resolve operator requests against live sensors
    pub fn update<H: Hardware + ?Sized>(&self, hw: &mut H, raise: bool, lower: bool) -> f32 {
        self.home(hw);
        let position = hw.counter(CounterId::Lift).position();
        let top_clear = self.top_clear(hw);
        self.command(raise, lower, position, top_clear)
    }

    /// Drop any upward command while the top switch is closed
    pub fn guard(&self, speed: f32, top_clear: bool) -> f32 {
        if speed > 0.0 && !top_clear {
            0.0
        } else {
            speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ActuatorId, ActuatorPort, LimitSwitch, PositionCounter};
    use core::time::Duration;

    struct MockMotor(f32);

    impl ActuatorPort for MockMotor {
        fn set_speed(&mut self, value: f32) {
            self.0 = value;
        }

        fn speed(&self) -> f32 {
            self.0
        }
    }

    struct MockCounter(i32);

    impl PositionCounter for MockCounter {
        fn position(&mut self) -> i32 {
            self.0
        }

        fn rate(&mut self) -> f32 {
            0.0
        }

        fn reset(&mut self) {
            self.0 = 0;
        }
    }

    struct MockSwitch(bool);

    impl LimitSwitch for MockSwitch {
        fn is_active(&mut self) -> bool {
            self.0
        }
    }

    /// Lift-only hardware; other ports are shared dummies
    struct MockLift {
        motor: MockMotor,
        counters: [MockCounter; 3],
        top: MockSwitch,
        bottom: MockSwitch,
    }

    impl MockLift {
        /// Carriage mid-travel at `position`, both switches open
        fn at(position: i32) -> Self {
            Self {
                motor: MockMotor(0.0),
                counters: [MockCounter(position), MockCounter(0), MockCounter(0)],
                top: MockSwitch(true),
                bottom: MockSwitch(true),
            }
        }
    }

    impl Hardware for MockLift {
        fn actuator(&mut self, _id: ActuatorId) -> &mut dyn ActuatorPort {
            &mut self.motor
        }

        fn counter(&mut self, id: CounterId) -> &mut dyn PositionCounter {
            &mut self.counters[id.index()]
        }

        fn switch(&mut self, id: SwitchId) -> &mut dyn LimitSwitch {
            match id {
                SwitchId::LiftTop => &mut self.top,
                SwitchId::LiftBottom => &mut self.bottom,
            }
        }

        fn now(&self) -> Duration {
            Duration::ZERO
        }
    }

    fn lift() -> LiftControl {
        LiftControl::new(LiftConfig::default())
    }

    #[test]
    fn test_raise_rules() {
        let l = lift();
        assert_eq!(l.command(true, false, 5_000, true), 1.0);
        assert_eq!(l.command(true, false, 20_000, true), 0.7);
        assert_eq!(l.command(true, false, 25_000, true), 0.7);
    }

    #[test]
    fn test_lower_rules() {
        let l = lift();
        assert_eq!(l.command(false, true, 10_000, true), -0.8);
        assert_eq!(l.command(false, true, 3_000, true), -0.5);
        assert_eq!(l.command(false, true, -200, true), -0.5);
    }

    #[test]
    fn test_hold_without_request() {
        assert_eq!(lift().command(false, false, 10_000, true), 0.0);
    }

    #[test]
    fn test_raise_blocked_at_top_switch() {
        let l = lift();
        assert_eq!(l.command(true, false, 21_000, false), 0.0);
        // Both held against a closed top switch: the lower rule applies
        assert_eq!(l.command(true, true, 21_000, false), -0.8);
    }

    #[test]
    fn test_raise_beats_lower() {
        assert_eq!(lift().command(true, true, 10_000, true), 1.0);
    }

    #[test]
    fn test_homing_rezeroes_on_bottom_switch() {
        let l = lift();
        let mut hw = MockLift::at(4_321);

        // Off the switch: counter untouched
        assert!(!l.home(&mut hw));
        assert_eq!(hw.counters[0].0, 4_321);

        hw.bottom.0 = false;
        assert!(l.home(&mut hw));
        assert_eq!(hw.counters[0].0, 0);
    }

    #[test]
    fn test_update_reads_position_after_homing() {
        let l = lift();
        let mut hw = MockLift::at(2_000);
        hw.bottom.0 = false;

        // Homed to zero, so lowering creeps
        assert_eq!(l.update(&mut hw, false, true), -0.5);
        assert_eq!(l.update(&mut hw, true, false), 1.0);

        hw.top.0 = false;
        assert_eq!(l.update(&mut hw, true, false), 0.0);
    }

    #[test]
    fn test_guard() {
        let l = lift();
        assert_eq!(l.guard(0.6, true), 0.6);
        assert_eq!(l.guard(0.6, false), 0.0);
        assert_eq!(l.guard(-0.5, false), -0.5);
    }
}
