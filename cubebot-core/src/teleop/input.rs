//! Operator input snapshot

/// Button assignments (1-based joystick button numbers)
pub mod bindings {
    /// Right trigger: intake
    pub const INTAKE: u8 = 1;
    /// Left trigger: eject
    pub const EJECT: u8 = 1;
    /// Right stick: hold to drive from the twist axis
    pub const ROTATE_IN_PLACE: u8 = 2;
    /// Right stick: raise lift
    pub const LIFT_RAISE: u8 = 5;
    /// Right stick: lower lift
    pub const LIFT_LOWER: u8 = 6;
    /// Right stick: vision LEDs off
    pub const LED_OFF: u8 = 7;
    /// Right stick: vision LEDs on
    pub const LED_ON: u8 = 9;
    /// Right stick: vision LEDs blink
    pub const LED_BLINK: u8 = 11;
    /// Left stick: toggle drive speed preset
    pub const SPEED_TOGGLE: u8 = 2;
    /// Left stick: run the climb winch
    pub const CLIMB: u8 = 3;
    /// Left stick: retract hook
    pub const HOOK_RETRACT: u8 = 4;
    /// Left stick: deploy hook
    pub const HOOK_DEPLOY: u8 = 6;
    /// Left stick: stop everything while held
    pub const ALL_STOP: u8 = 11;
}

/// One joystick's state for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Joystick {
    /// Side-to-side axis
    pub x: f32,
    /// Fore-aft axis (pushed forward is negative)
    pub y: f32,
    /// Twist axis
    pub twist: f32,
    /// Button bitmask, bit `n - 1` for button `n`
    pub buttons: u32,
}

impl Joystick {
    /// Centered stick, no buttons held
    pub const fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            twist: 0.0,
            buttons: 0,
        }
    }

    /// Set the fore-aft axis
    pub const fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Set the twist axis
    pub const fn with_twist(mut self, twist: f32) -> Self {
        self.twist = twist;
        self
    }

    /// Hold a button (1-based; out-of-range numbers are ignored)
    pub const fn press(mut self, button: u8) -> Self {
        if button >= 1 && button <= 32 {
            self.buttons |= 1 << (button - 1);
        }
        self
    }

    /// Check if a button is held (1-based)
    pub const fn button(&self, button: u8) -> bool {
        button >= 1 && button <= 32 && self.buttons & (1 << (button - 1)) != 0
    }

    /// Check if the trigger (button 1) is held
    pub const fn trigger(&self) -> bool {
        self.button(1)
    }
}

/// Both joysticks for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OperatorInput {
    /// Left stick: left drive side, climb and hook
    pub left: Joystick,
    /// Right stick: right drive side, collector, lift and LEDs
    pub right: Joystick,
}
