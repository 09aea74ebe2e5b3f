//! Limit switch implementations

pub mod reed;

pub use reed::ReedSwitch;
