//! Configuration type definitions
//!
//! Defaults carry the values the robot was tuned with on the practice
//! field. Speeds are normalized actuator commands, positions are raw
//! encoder counts and times are seconds.

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 2;

/// Convert a configured number of seconds to a duration
///
/// Negative or non-finite values read as zero.
pub fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

/// Drivetrain configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriveConfig {
    /// Output scale of the fast preset
    pub fast_scale: f32,
    /// Output scale of the slow (precision) preset
    pub slow_scale: f32,
    /// Twist axis scale while rotating in place
    pub twist_scale: f32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            fast_scale: 0.75,
            slow_scale: 0.45,
            twist_scale: 0.7,
        }
    }
}

/// Lift configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LiftConfig {
    /// Raise speed below the high soft limit
    pub raise_speed: f32,
    /// Raise speed at or above the high soft limit
    pub creep_raise_speed: f32,
    /// Lower speed (magnitude) above the low soft limit
    pub lower_speed: f32,
    /// Lower speed (magnitude) at or below the low soft limit
    pub creep_lower_speed: f32,
    /// Position at which raising slows down (counts)
    pub high_soft_limit: i32,
    /// Position at which lowering slows down (counts)
    pub low_soft_limit: i32,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            raise_speed: 1.0,
            creep_raise_speed: 0.7,
            lower_speed: 0.8,
            creep_lower_speed: 0.5,
            high_soft_limit: 20_000,
            low_soft_limit: 3_000,
        }
    }
}

/// Collector configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollectorConfig {
    /// Left wheel command while intaking (sign sets the wheel direction)
    pub collect_speed: f32,
    /// Right wheel speed as a fraction of the left, opposite direction
    pub right_ratio: f32,
    /// Left wheel idle bias as a fraction of the collect speed
    pub idle_left: f32,
    /// Right wheel idle bias as a fraction of the collect speed
    pub idle_right: f32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            collect_speed: -1.0,
            right_ratio: 0.7,
            idle_left: 0.375,
            idle_right: 0.25,
        }
    }
}

/// Climb and hook configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClimbConfig {
    /// Climb winch speed
    pub climb_speed: f32,
    /// Hook deploy/retract speed
    pub hook_speed: f32,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            climb_speed: 1.0,
            hook_speed: 1.0,
        }
    }
}

/// Slew-rate law for operator axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SlewLaw {
    /// Step up by `max_step` when the gap exceeds it, otherwise step down
    /// by `max_step`. Matches the tuning the drivers practiced with.
    #[default]
    Legacy,
    /// Clamp the change to `±max_step` in both directions
    Symmetric,
}

/// Operator control configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TeleopConfig {
    /// Largest per-tick change of a slewed axis
    pub max_change: f32,
    /// Slew law applied to the slewed axes
    pub slew_law: SlewLaw,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            max_change: 0.05,
            slew_law: SlewLaw::Legacy,
        }
    }
}

/// Autonomous routine tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoConfig {
    /// Left drive input while driving forward (trimmed for drift)
    pub left_speed: f32,
    /// Right drive input while driving forward
    pub right_speed: f32,
    /// Drive input magnitude while turning in place
    pub turn_speed: f32,
    /// Lift speed for the quick clear-the-floor raise
    pub slow_lift_speed: f32,
    /// Lift speed for the full raise
    pub full_lift_speed: f32,
    /// Collector grip as a fraction of the collect speed
    pub grip_fraction: f32,
    /// Drive counter counts per foot of travel
    pub counts_per_foot: f32,
    /// Lift height for the center and fallback routines (counts)
    pub clear_height: i32,
    /// Lift height for the cross-line and far routines (counts)
    pub full_height: i32,
    /// Center routine drive distance (feet)
    pub center_distance_ft: f32,
    /// Far routine drive distance (feet)
    pub far_distance_ft: f32,
    /// Fallback routine drive distance (feet)
    pub fallback_distance_ft: f32,
    /// Far routine turn distance on the right counter (feet)
    pub turn_distance_ft: f32,
    /// Cross-line drive time (seconds)
    pub cross_line_drive_s: f32,
    /// Cross-line routine deadline (seconds)
    pub cross_line_deadline_s: f32,
    /// Eject dwell when placing a cube (seconds)
    pub place_s: f32,
    /// Watchdog ceiling for the lift phase (seconds)
    pub lift_limit_s: f32,
    /// Watchdog ceiling for the drive phase (seconds)
    pub drive_limit_s: f32,
    /// Watchdog ceiling for the placement phase (seconds)
    pub place_limit_s: f32,
    /// Watchdog ceiling for the far routines' turn (seconds)
    pub turn_limit_s: f32,
    /// Watchdog ceiling for the far routines' placement (seconds)
    pub far_place_limit_s: f32,
    /// Lower the lift onto the bottom switch after placing
    pub stow_after_place: bool,
    /// Routine deadline for the placement routines (seconds)
    pub deadline_s: f32,
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            left_speed: 0.4 * 1.05,
            right_speed: 0.4,
            turn_speed: 0.6,
            slow_lift_speed: 0.6,
            full_lift_speed: 1.0,
            grip_fraction: 0.25,
            counts_per_foot: 80.0,
            clear_height: 7_000,
            full_height: 8_500,
            center_distance_ft: 8.5,
            far_distance_ft: 10.0,
            fallback_distance_ft: 9.0,
            turn_distance_ft: 2.5,
            cross_line_drive_s: 5.0,
            cross_line_deadline_s: 8.0,
            place_s: 3.0,
            lift_limit_s: 2.0,
            drive_limit_s: 7.0,
            place_limit_s: 10.0,
            turn_limit_s: 9.0,
            far_place_limit_s: 11.0,
            stow_after_place: false,
            deadline_s: 15.0,
        }
    }
}

impl AutoConfig {
    /// Convert feet of travel to drive counter counts
    pub fn counts(&self, feet: f32) -> i32 {
        (feet * self.counts_per_foot) as i32
    }
}

/// Complete robot configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RobotConfig {
    /// Layout version, checked by the binary codec
    pub version: u8,
    /// Drivetrain
    pub drive: DriveConfig,
    /// Lift
    pub lift: LiftConfig,
    /// Collector
    pub collector: CollectorConfig,
    /// Climb and hook
    pub climb: ClimbConfig,
    /// Operator controls
    pub teleop: TeleopConfig,
    /// Autonomous routines
    pub auto: AutoConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            drive: DriveConfig::default(),
            lift: LiftConfig::default(),
            collector: CollectorConfig::default(),
            climb: ClimbConfig::default(),
            teleop: TeleopConfig::default(),
            auto: AutoConfig::default(),
        }
    }
}
