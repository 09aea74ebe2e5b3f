//! Operator control
//!
//! Maps the two driver joysticks onto the shared control primitives.

pub mod input;
pub mod mapper;

pub use input::{bindings, Joystick, OperatorInput};
pub use mapper::{TeleopMapper, TeleopOutput};
