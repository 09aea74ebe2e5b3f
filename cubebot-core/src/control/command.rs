//! Per-tick actuator command set

use crate::traits::{clamp_speed, ActuatorId, Hardware};

/// One speed command for every actuator
///
/// Actuators not written during a tick stay at zero, so an empty set is
/// an all-stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandSet {
    speeds: [f32; ActuatorId::COUNT],
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::stopped()
    }
}

impl CommandSet {
    /// All actuators at zero
    pub const fn stopped() -> Self {
        Self {
            speeds: [0.0; ActuatorId::COUNT],
        }
    }

    /// Set one actuator (last write wins)
    pub fn set(&mut self, id: ActuatorId, speed: f32) {
        self.speeds[id.index()] = speed;
    }

    /// Requested speed of one actuator, before clamping
    pub fn get(&self, id: ActuatorId) -> f32 {
        self.speeds[id.index()]
    }

    /// Check if every actuator is commanded to zero
    pub fn is_stopped(&self) -> bool {
        self.speeds.iter().all(|s| *s == 0.0)
    }

    /// Clamp every command and write it to the hardware
    pub fn apply<H: Hardware + ?Sized>(&self, hw: &mut H) {
        for id in ActuatorId::ALL {
            hw.actuator(id).set_speed(clamp_speed(self.get(id)));
        }
    }
}
