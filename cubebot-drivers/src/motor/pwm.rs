//! PWM speed controller driver
//!
//! Drives a servo-style motor controller from an embedded-hal PWM
//! channel. A speed in `[-1, 1]` is mapped linearly onto the pulse
//! width between `min_pulse_us` and `max_pulse_us`; the channel period
//! sets how that pulse becomes a duty cycle.
//!
//! # Usage
//!
//! ```ignore
//! let mut lift = PwmSpeedController::new(channel, PwmSpeedControllerConfig::default());
//! lift.set_speed(0.5); // 1750 us pulse
//! ```
//!
//! A failed duty-cycle write latches a fault. The controller keeps
//! accepting commands (so the next write can recover the output) but
//! reports the fault until [`PwmSpeedController::clear_fault`].

use cubebot_core::traits::{clamp_speed, ActuatorPort};
use embedded_hal::pwm::{Error as _, SetDutyCycle};

/// PWM speed controller configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmSpeedControllerConfig {
    /// PWM period in microseconds
    pub period_us: u32,
    /// Pulse width at full reverse
    pub min_pulse_us: u32,
    /// Pulse width at full forward
    pub max_pulse_us: u32,
    /// Speeds with a magnitude at or below this are sent as neutral
    pub deadband: f32,
    /// Swap forward and reverse (motor mounted mirrored)
    pub inverted: bool,
}

impl Default for PwmSpeedControllerConfig {
    fn default() -> Self {
        Self {
            period_us: 5_000,
            min_pulse_us: 1_000,
            max_pulse_us: 2_000,
            deadband: 0.0,
            inverted: false,
        }
    }
}

/// Speed controller on one PWM channel
pub struct PwmSpeedController<P> {
    channel: P,
    config: PwmSpeedControllerConfig,
    /// Last commanded speed after clamping and inversion
    speed: f32,
    /// A duty write failed since the last clear
    faulted: bool,
}

impl<P: SetDutyCycle> PwmSpeedController<P> {
    /// Create a controller and drive it to neutral
    pub fn new(channel: P, config: PwmSpeedControllerConfig) -> Self {
        let mut controller = Self {
            channel,
            config,
            speed: 0.0,
            faulted: false,
        };
        controller.write(0.0);
        controller
    }

    /// Get the configuration
    pub fn config(&self) -> &PwmSpeedControllerConfig {
        &self.config
    }

    /// Check if a duty write has failed since the last clear
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Forget a latched fault
    pub fn clear_fault(&mut self) {
        self.faulted = false;
    }

    /// Release the PWM channel
    pub fn release(self) -> P {
        self.channel
    }

    /// Pulse width in microseconds for a clamped speed
    pub fn pulse_width_us(&self, speed: f32) -> u32 {
        let c = &self.config;
        let span = c.max_pulse_us.saturating_sub(c.min_pulse_us) as f32;
        let fraction = (speed + 1.0) / 2.0;
        c.min_pulse_us + (fraction * span + 0.5) as u32
    }

    /// Duty cycle for a pulse width, in channel units
    fn duty_for(&self, pulse_us: u32) -> u16 {
        let max = u64::from(self.channel.max_duty_cycle());
        let period = u64::from(self.config.period_us.max(1));
        let duty = u64::from(pulse_us).min(period) * max / period;
        u16::try_from(duty).unwrap_or(u16::MAX)
    }

    fn write(&mut self, speed: f32) {
        let speed = if speed <= self.config.deadband && speed >= -self.config.deadband {
            0.0
        } else {
            speed
        };
        let duty = self.duty_for(self.pulse_width_us(speed));
        if let Err(e) = self.channel.set_duty_cycle(duty) {
            if !self.faulted {
                log::warn!("PWM write failed: {:?}", e.kind());
            }
            self.faulted = true;
        }
    }
}

impl<P: SetDutyCycle> ActuatorPort for PwmSpeedController<P> {
    fn set_speed(&mut self, value: f32) {
        let value = clamp_speed(value);
        self.speed = value;
        let output = if self.config.inverted { -value } else { value };
        self.write(output);
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}
