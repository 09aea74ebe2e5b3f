//! Scripted driver for the teleop period
//!
//! A script is a list of timed steps; each step holds the stick state
//! from its start time until the next step begins.

use std::time::Duration;

use cubebot_core::teleop::{bindings, Joystick, OperatorInput};

/// Stick state held from `at` onward
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub at: Duration,
    pub input: OperatorInput,
}

/// Timed operator input
#[derive(Debug, Clone, Default)]
pub struct DriverScript {
    steps: Vec<Step>,
}

impl DriverScript {
    /// Script that never touches the sticks
    pub fn idle() -> Self {
        Self::default()
    }

    /// Append a step starting at `at` seconds into teleop
    pub fn then(mut self, at_secs: f32, left: Joystick, right: Joystick) -> Self {
        let at = Duration::try_from_secs_f32(at_secs).unwrap_or(Duration::ZERO);
        self.steps.push(Step {
            at,
            input: OperatorInput { left, right },
        });
        self.steps.sort_by_key(|step| step.at);
        self
    }

    /// A short shakedown of every binding
    pub fn shakedown() -> Self {
        let none = Joystick::new();
        Self::idle()
            // Drive forward
            .then(0.0, none.with_y(-0.8), none.with_y(-0.8))
            // Intake while raising the lift
            .then(1.5, none, none.press(bindings::INTAKE).press(bindings::LIFT_RAISE))
            // Rotate in place
            .then(3.0, none, none.with_twist(0.6).press(bindings::ROTATE_IN_PLACE))
            // Toggle to slow and back up, then release
            .then(4.0, none.press(bindings::SPEED_TOGGLE), none)
            .then(4.1, none.with_y(0.5), none.with_y(0.5))
            // Lower the lift while ejecting
            .then(5.0, none.press(bindings::EJECT), none.press(bindings::LIFT_LOWER))
            // Blink the ring light and deploy the hook
            .then(7.0, none.press(bindings::HOOK_DEPLOY), none.press(bindings::LED_BLINK))
            // Climb
            .then(8.0, none.press(bindings::CLIMB), none.press(bindings::LED_OFF))
            // Release everything
            .then(9.0, none, none)
    }

    /// Stick state `elapsed` into teleop
    pub fn input_at(&self, elapsed: Duration) -> OperatorInput {
        self.steps
            .iter()
            .take_while(|step| step.at <= elapsed)
            .last()
            .map(|step| step.input)
            .unwrap_or_default()
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the script has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
