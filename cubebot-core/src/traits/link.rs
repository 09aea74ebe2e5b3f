//! Host link traits
//!
//! The vision coprocessor and the driver dashboard are both plain
//! key/value tables owned by the host. The core receives them as
//! capabilities on every tick rather than caching table handles.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vision table key selecting the camera pipeline mode
pub const KEY_CAMERA_MODE: &str = "camMode";
/// Vision table key selecting the illumination mode
pub const KEY_LED_MODE: &str = "ledMode";
/// Vision table key for the horizontal target offset (degrees)
pub const KEY_TARGET_X: &str = "tx";
/// Vision table key for the vertical target offset (degrees)
pub const KEY_TARGET_Y: &str = "ty";
/// Vision table key for the target area (percent of image)
pub const KEY_TARGET_AREA: &str = "ta";

/// Numeric key/value table shared with the vision coprocessor
pub trait VisionLink {
    /// Write a number under `key`
    fn put_number(&mut self, key: &str, value: f64);

    /// Read a number, or `default` if the key is absent
    fn get_number(&self, key: &str, default: f64) -> f64;
}

/// Status display sink (driver dashboard)
pub trait TelemetrySink {
    /// Publish a human-readable string
    fn put_string(&mut self, key: &str, value: &str);

    /// Publish a boolean indicator
    fn put_bool(&mut self, key: &str, value: bool);
}

/// Camera pipeline mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CameraMode {
    /// Target processing enabled
    #[default]
    Vision,
    /// Raw image for the driver, processing off
    Driver,
}

impl CameraMode {
    /// Table value for this mode
    pub const fn code(self) -> f64 {
        match self {
            CameraMode::Vision => 0.0,
            CameraMode::Driver => 1.0,
        }
    }
}

/// Illumination ring mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LedMode {
    /// Lit as the pipeline requests
    On,
    /// Dark
    #[default]
    Off,
    /// Blinking
    Blink,
}

impl LedMode {
    /// Table value for this mode
    pub const fn code(self) -> f64 {
        match self {
            LedMode::On => 0.0,
            LedMode::Off => 1.0,
            LedMode::Blink => 2.0,
        }
    }
}

/// Latest target reading from the vision coprocessor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VisionTarget {
    /// Horizontal offset (degrees)
    pub x: f64,
    /// Vertical offset (degrees)
    pub y: f64,
    /// Target area (percent of image)
    pub area: f64,
}

/// Select the camera pipeline mode
pub fn set_camera_mode<V: VisionLink + ?Sized>(link: &mut V, mode: CameraMode) {
    link.put_number(KEY_CAMERA_MODE, mode.code());
}

/// Select the illumination mode
pub fn set_led_mode<V: VisionLink + ?Sized>(link: &mut V, mode: LedMode) {
    link.put_number(KEY_LED_MODE, mode.code());
}

/// Read the current target, with zeros for missing keys
pub fn read_target<V: VisionLink + ?Sized>(link: &V) -> VisionTarget {
    VisionTarget {
        x: link.get_number(KEY_TARGET_X, 0.0),
        y: link.get_number(KEY_TARGET_Y, 0.0),
        area: link.get_number(KEY_TARGET_AREA, 0.0),
    }
}
