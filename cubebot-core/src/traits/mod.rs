//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic
//! and hardware-specific or host-specific implementations.

pub mod actuator;
pub mod hardware;
pub mod link;
pub mod sensor;

pub use actuator::{clamp_speed, ActuatorPort};
pub use hardware::{ActuatorId, CounterId, Hardware, SwitchId};
pub use link::{CameraMode, LedMode, TelemetrySink, VisionLink, VisionTarget};
pub use sensor::{LimitSwitch, PositionCounter, Stopwatch};
