//! Host simulator for the Cubebot control core
//!
//! Runs the real [`cubebot_core::Robot`] against a kinematic plant so
//! routines and operator bindings can be exercised without a robot.

pub mod config;
pub mod dashboard;
pub mod logger;
pub mod plant;
pub mod script;
pub mod session;

pub use dashboard::Dashboard;
pub use plant::{Plant, PlantConfig};
pub use script::DriverScript;
pub use session::{run_match, MatchOptions, MatchReport};
