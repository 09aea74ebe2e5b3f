//! Tank drive composition

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::CommandSet;
use crate::config::DriveConfig;
use crate::traits::ActuatorId;

/// Drive output scale preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpeedPreset {
    /// Full field speed
    #[default]
    Fast,
    /// Precision speed for lining up
    Slow,
}

impl SpeedPreset {
    /// The other preset
    pub const fn toggled(self) -> Self {
        match self {
            SpeedPreset::Fast => SpeedPreset::Slow,
            SpeedPreset::Slow => SpeedPreset::Fast,
        }
    }
}

/// Compose a tank drive command
///
/// Returns `(left_output, right_output)`. The left gearbox is mounted
/// mirrored, so its channel is negated.
pub fn tank_drive(left: f32, right: f32, scale: f32) -> (f32, f32) {
    (-left * scale, right * scale)
}

/// Drivetrain control
///
/// Stateless apart from the speed preset and the edge detector for the
/// button that toggles it.
#[derive(Debug, Clone)]
pub struct DriveControl {
    config: DriveConfig,
    preset: SpeedPreset,
    /// Toggle button level on the previous tick
    toggle_held: bool,
}

impl DriveControl {
    /// Create a drive control on the fast preset
    pub fn new(config: DriveConfig) -> Self {
        Self {
            config,
            preset: SpeedPreset::Fast,
            toggle_held: false,
        }
    }

    /// Current preset
    pub fn preset(&self) -> SpeedPreset {
        self.preset
    }

    /// Output scale of the current preset
    pub fn scale(&self) -> f32 {
        match self.preset {
            SpeedPreset::Fast => self.config.fast_scale,
            SpeedPreset::Slow => self.config.slow_scale,
        }
    }

    /// Twist axis scale for rotating in place
    pub fn twist_scale(&self) -> f32 {
        self.config.twist_scale
    }

    /// Feed the toggle button level; flips the preset on a press edge
    ///
    /// Returns true if the preset changed.
    pub fn update_toggle(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.toggle_held;
        self.toggle_held = pressed;
        if edge {
            self.preset = self.preset.toggled();
            log::debug!("Drive preset {:?}", self.preset);
        }
        edge
    }

    /// Return to the fast preset and forget the toggle button level
    pub fn reset_preset(&mut self) {
        self.preset = SpeedPreset::Fast;
        self.toggle_held = false;
    }

    /// Write a tank drive command at the current preset
    pub fn tank(&self, commands: &mut CommandSet, left: f32, right: f32) {
        let (left_out, right_out) = tank_drive(left, right, self.scale());
        commands.set(ActuatorId::DriveLeft, left_out);
        commands.set(ActuatorId::DriveRight, right_out);
    }
}
