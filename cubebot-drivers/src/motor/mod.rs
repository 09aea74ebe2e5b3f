//! Motor controller implementations
//!
//! Speed controllers that take a servo-style pulse: 1.5 ms is neutral,
//! 1.0 ms full reverse and 2.0 ms full forward.

pub mod pwm;

pub use pwm::{PwmSpeedController, PwmSpeedControllerConfig};
