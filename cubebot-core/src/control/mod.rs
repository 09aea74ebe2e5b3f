//! Control primitives shared by teleop and autonomous
//!
//! Every tick both drivers build one [`CommandSet`] through these
//! primitives; the controller clamps and dispatches it.

pub mod collector;
pub mod command;
pub mod drive;
pub mod lift;
pub mod slew;

pub use collector::{CollectorControl, CollectorMode};
pub use command::CommandSet;
pub use drive::{tank_drive, DriveControl, SpeedPreset};
pub use lift::LiftControl;
pub use slew::{slew_step, SlewLimiter};

use crate::config::RobotConfig;

/// The robot's mechanisms, as both drivers see them
#[derive(Debug, Clone)]
pub struct Mechanism {
    /// Drivetrain composition and speed preset
    pub drive: DriveControl,
    /// Lift homing and motion rules
    pub lift: LiftControl,
    /// Collector wheel composition
    pub collector: CollectorControl,
}

impl Mechanism {
    /// Build the mechanisms from configuration
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            drive: DriveControl::new(config.drive),
            lift: LiftControl::new(config.lift),
            collector: CollectorControl::new(config.collector),
        }
    }
}
