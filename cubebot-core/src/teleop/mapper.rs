//! Operator input mapping
//!
//! One call per teleop tick. Slew memory lives here and is cleared on
//! every mode change.

use super::input::{bindings, OperatorInput};
use crate::config::{ClimbConfig, RobotConfig};
use crate::control::{CollectorMode, CommandSet, Mechanism, SlewLimiter};
use crate::traits::{ActuatorId, Hardware, LedMode};

/// Result of one teleop tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleopOutput {
    /// Commands to dispatch
    pub commands: CommandSet,
    /// LED mode to forward to the vision link, if a LED button is held
    pub led_mode: Option<LedMode>,
}

/// Teleop mapper
#[derive(Debug, Clone)]
pub struct TeleopMapper {
    left_y: SlewLimiter,
    right_y: SlewLimiter,
    twist: SlewLimiter,
    climb: ClimbConfig,
}

impl TeleopMapper {
    /// Create a mapper with fresh slew memory
    pub fn new(config: &RobotConfig) -> Self {
        let step = config.teleop.max_change;
        let law = config.teleop.slew_law;
        Self {
            left_y: SlewLimiter::new(step, law),
            right_y: SlewLimiter::new(step, law),
            twist: SlewLimiter::new(step, law),
            climb: config.climb,
        }
    }

    /// Clear slew memory
    pub fn reset(&mut self) {
        self.left_y.reset();
        self.right_y.reset();
        self.twist.reset();
    }

    /// Map one tick of operator input
    pub fn tick<H: Hardware + ?Sized>(
        &mut self,
        input: &OperatorInput,
        hw: &mut H,
        mechanism: &mut Mechanism,
    ) -> TeleopOutput {
        let left = &input.left;
        let right = &input.right;
        let mut commands = CommandSet::stopped();

        let left_value = self.left_y.next(left.y);
        let right_value = self.right_y.next(right.y);
        let twist_value = self.twist.next(right.twist);

        mechanism.drive.update_toggle(left.button(bindings::SPEED_TOGGLE));

        let collector = CollectorMode::from_triggers(right.trigger(), left.trigger());
        mechanism.collector.apply(&mut commands, collector);

        let lift = mechanism.lift.update(
            hw,
            right.button(bindings::LIFT_RAISE),
            right.button(bindings::LIFT_LOWER),
        );
        commands.set(ActuatorId::Lift, lift);

        let hook = if left.button(bindings::HOOK_DEPLOY) {
            self.climb.hook_speed
        } else if left.button(bindings::HOOK_RETRACT) {
            -self.climb.hook_speed
        } else {
            0.0
        };
        commands.set(ActuatorId::Hook, hook);

        let climb = if left.button(bindings::CLIMB) {
            self.climb.climb_speed
        } else {
            0.0
        };
        commands.set(ActuatorId::Climb, climb);

        if right.button(bindings::ROTATE_IN_PLACE) {
            let twist_scale = mechanism.drive.twist_scale();
            if twist_value != 0.0 {
                let turn = twist_value * twist_scale;
                mechanism.drive.tank(&mut commands, -turn, turn);
            } else if right_value != 0.0 {
                mechanism.drive.tank(&mut commands, right_value, right_value);
            } else {
                mechanism.drive.tank(&mut commands, 0.0, 0.0);
            }
        } else {
            mechanism.drive.tank(&mut commands, left_value, right_value);
        }

        // Checked in sequence without exclusion: the last held button wins
        let mut led_mode = None;
        if right.button(bindings::LED_OFF) {
            led_mode = Some(LedMode::Off);
        }
        if right.button(bindings::LED_ON) {
            led_mode = Some(LedMode::On);
        }
        if right.button(bindings::LED_BLINK) {
            led_mode = Some(LedMode::Blink);
        }

        if left.button(bindings::ALL_STOP) {
            commands = CommandSet::stopped();
        }

        TeleopOutput { commands, led_mode }
    }
}
