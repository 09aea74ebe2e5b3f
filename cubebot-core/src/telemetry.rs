//! Dashboard publishing
//!
//! Status goes out as short key/value strings. Values are formatted into
//! fixed-size buffers; anything that does not fit is truncated.

use core::fmt::Write;
use core::time::Duration;

use heapless::String;

use crate::auton::{AllianceSide, AutonomousSequencer, RoutineId, Selection};
use crate::control::SpeedPreset;
use crate::traits::{CounterId, Hardware, SwitchId, TelemetrySink, VisionTarget};

/// Telemetry keys
pub mod keys {
    pub const AUTO_SELECTED: &str = "Auto Selected";
    pub const SWITCH_SIDE: &str = "Switch Side";
    pub const AUTO_STATUS: &str = "Auto Status";
    pub const AUTO_PHASE: &str = "Auto Phase";
    pub const TIMER: &str = "Timer";
    pub const LIFT_COUNT: &str = "Lift Count";
    pub const LIFT_RATE: &str = "Lift Rate";
    pub const LEFT_DRIVE_COUNT: &str = "Left Drive Count";
    pub const LEFT_DRIVE_RATE: &str = "Left Drive Rate";
    pub const RIGHT_DRIVE_COUNT: &str = "Right Drive Count";
    pub const RIGHT_DRIVE_RATE: &str = "Right Drive Rate";
    pub const REED_TOP: &str = "Reed Switch Top";
    pub const REED_BOTTOM: &str = "Reed Switch Bot";
    pub const DRIVE_SPEED: &str = "Drive Speed";
    pub const VISION_X: &str = "Vision tx";
    pub const VISION_Y: &str = "Vision ty";
    pub const VISION_AREA: &str = "Vision ta";
}

type Value = String<24>;

fn put_number<T: TelemetrySink + ?Sized>(sink: &mut T, key: &str, value: impl core::fmt::Display) {
    let mut text = Value::new();
    let _ = write!(text, "{}", value);
    sink.put_string(key, &text);
}

fn put_fixed<T: TelemetrySink + ?Sized>(sink: &mut T, key: &str, value: f64) {
    let mut text = Value::new();
    let _ = write!(text, "{:.2}", value);
    sink.put_string(key, &text);
}

/// Publish encoder counts and rates plus switch levels
///
/// The left drive encoder counts backwards when driving forward, so its
/// count is shown negated.
pub fn publish_sensors<H: Hardware + ?Sized, T: TelemetrySink + ?Sized>(hw: &mut H, sink: &mut T) {
    let lift = hw.counter(CounterId::Lift);
    let (lift_count, lift_rate) = (lift.position(), lift.rate());
    let left = hw.counter(CounterId::DriveLeft);
    let (left_count, left_rate) = (left.position(), left.rate());
    let right = hw.counter(CounterId::DriveRight);
    let (right_count, right_rate) = (right.position(), right.rate());
    let top = hw.switch(SwitchId::LiftTop).is_active();
    let bottom = hw.switch(SwitchId::LiftBottom).is_active();

    put_number(sink, keys::LIFT_COUNT, lift_count);
    put_fixed(sink, keys::LIFT_RATE, f64::from(lift_rate));
    put_number(sink, keys::LEFT_DRIVE_COUNT, left_count.wrapping_neg());
    put_fixed(sink, keys::LEFT_DRIVE_RATE, f64::from(left_rate));
    put_number(sink, keys::RIGHT_DRIVE_COUNT, right_count);
    put_fixed(sink, keys::RIGHT_DRIVE_RATE, f64::from(right_rate));
    sink.put_bool(keys::REED_TOP, top);
    sink.put_bool(keys::REED_BOTTOM, bottom);
}

/// Publish the drive speed preset
pub fn publish_drive<T: TelemetrySink + ?Sized>(sink: &mut T, preset: SpeedPreset, scale: f32) {
    let mut text = Value::new();
    let name = match preset {
        SpeedPreset::Fast => "Fast",
        SpeedPreset::Slow => "Slow",
    };
    let _ = write!(text, "{} ({:.2})", name, scale);
    sink.put_string(keys::DRIVE_SPEED, &text);
}

/// Publish the operator selection as resolved at autonomous entry
pub fn publish_selection<T: TelemetrySink + ?Sized>(sink: &mut T, requested: Selection, running: RoutineId) {
    let mut text: String<48> = String::new();
    match requested.routine {
        Some(id) if id == running => {
            let _ = text.push_str(running.label());
        }
        _ => {
            let _ = write!(text, "{} (default)", running.label());
        }
    }
    sink.put_string(keys::AUTO_SELECTED, &text);
    publish_side(sink, requested.side);
}

fn publish_side<T: TelemetrySink + ?Sized>(sink: &mut T, side: AllianceSide) {
    sink.put_string(keys::SWITCH_SIDE, side.letter());
}

/// Publish sequencer status, active phase and routine clock
pub fn publish_sequencer<T: TelemetrySink + ?Sized>(sink: &mut T, sequencer: &AutonomousSequencer, now: Duration) {
    sink.put_string(keys::AUTO_STATUS, sequencer.status().label());

    let mut phase = Value::new();
    match sequencer.current_phase() {
        Some(p) => {
            let _ = write!(phase, "{} {}", sequencer.state().current_phase_index, p.name);
        }
        None => {
            let _ = phase.push_str("-");
        }
    }
    sink.put_string(keys::AUTO_PHASE, &phase);

    put_fixed(sink, keys::TIMER, sequencer.elapsed(now).as_secs_f64());
}

/// Forward the vision target
pub fn publish_vision<T: TelemetrySink + ?Sized>(sink: &mut T, target: VisionTarget) {
    put_fixed(sink, keys::VISION_X, target.x);
    put_fixed(sink, keys::VISION_Y, target.y);
    put_fixed(sink, keys::VISION_AREA, target.area);
}
