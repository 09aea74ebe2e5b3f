//! Board-agnostic control core for the Cubebot competition robot
//!
//! This crate contains all control logic that does not depend on
//! specific hardware implementations:
//!
//! - Port traits for actuators, counters, switches and host links
//! - Control primitives (slew limiting, tank drive, lift, collector)
//! - Autonomous sequencer with watchdog-bounded phase gating
//! - Teleop operator mapping
//! - Configuration type definitions
//! - Telemetry publishing and the per-mode robot lifecycle

#![no_std]
#![deny(unsafe_code)]

pub mod auton;
pub mod config;
pub mod control;
pub mod controller;
pub mod telemetry;
pub mod teleop;
pub mod traits;

pub use controller::{Host, Mode, Robot};
