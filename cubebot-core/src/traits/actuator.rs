//! Actuator port trait
//!
//! Every motor on the robot is driven through a normalized speed command.

/// Normalized speed actuator
///
/// Implementations forward a speed in `[-1.0, 1.0]` to a motor controller.
/// Writes are idempotent and the last write wins. Callers clamp before
/// writing (see [`clamp_speed`]), but implementations must tolerate any
/// value without panicking.
pub trait ActuatorPort {
    /// Command a normalized speed
    fn set_speed(&mut self, value: f32);

    /// Last commanded speed
    fn speed(&self) -> f32;
}

/// Clamp a computed command into the actuator range
///
/// NaN maps to 0.0 so a bad computation stops the motor.
pub fn clamp_speed(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_in_range() {
        assert_eq!(clamp_speed(0.0), 0.0);
        assert_eq!(clamp_speed(0.5), 0.5);
        assert_eq!(clamp_speed(-1.0), -1.0);
    }

    #[test]
    fn test_clamp_out_of_range() {
        assert_eq!(clamp_speed(1.7), 1.0);
        assert_eq!(clamp_speed(-3.0), -1.0);
        assert_eq!(clamp_speed(f32::INFINITY), 1.0);
        assert_eq!(clamp_speed(f32::NEG_INFINITY), -1.0);
    }

    #[test]
    fn test_clamp_nan_stops() {
        assert_eq!(clamp_speed(f32::NAN), 0.0);
    }
}
