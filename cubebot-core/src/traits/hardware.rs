//! Robot hardware bundle
//!
//! The control logic addresses every port by a typed identifier, so
//! routines can name the counter or switch a phase waits on as data.

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{ActuatorPort, LimitSwitch, PositionCounter};

/// Actuator identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActuatorId {
    /// Left drivetrain gearbox
    DriveLeft,
    /// Right drivetrain gearbox
    DriveRight,
    /// Left collector wheel
    CollectorLeft,
    /// Right collector wheel
    CollectorRight,
    /// Lift winch
    Lift,
    /// Climb winch
    Climb,
    /// Hook deploy motor
    Hook,
}

impl ActuatorId {
    /// Number of actuators on the robot
    pub const COUNT: usize = 7;

    /// All actuators in index order
    pub const ALL: [ActuatorId; Self::COUNT] = [
        ActuatorId::DriveLeft,
        ActuatorId::DriveRight,
        ActuatorId::CollectorLeft,
        ActuatorId::CollectorRight,
        ActuatorId::Lift,
        ActuatorId::Climb,
        ActuatorId::Hook,
    ];

    /// Index into per-actuator arrays
    pub const fn index(self) -> usize {
        match self {
            ActuatorId::DriveLeft => 0,
            ActuatorId::DriveRight => 1,
            ActuatorId::CollectorLeft => 2,
            ActuatorId::CollectorRight => 3,
            ActuatorId::Lift => 4,
            ActuatorId::Climb => 5,
            ActuatorId::Hook => 6,
        }
    }
}

/// Position counter identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CounterId {
    /// Lift winch encoder
    Lift,
    /// Left drivetrain encoder
    DriveLeft,
    /// Right drivetrain encoder
    DriveRight,
}

impl CounterId {
    /// Number of counters on the robot
    pub const COUNT: usize = 3;

    /// All counters in index order
    pub const ALL: [CounterId; Self::COUNT] =
        [CounterId::Lift, CounterId::DriveLeft, CounterId::DriveRight];

    /// Index into per-counter arrays
    pub const fn index(self) -> usize {
        match self {
            CounterId::Lift => 0,
            CounterId::DriveLeft => 1,
            CounterId::DriveRight => 2,
        }
    }
}

/// Limit switch identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwitchId {
    /// Reed switch at the top of lift travel
    LiftTop,
    /// Reed switch at the bottom of lift travel (home)
    LiftBottom,
}

impl SwitchId {
    /// Number of switches on the robot
    pub const COUNT: usize = 2;

    /// Index into per-switch arrays
    pub const fn index(self) -> usize {
        match self {
            SwitchId::LiftTop => 0,
            SwitchId::LiftBottom => 1,
        }
    }
}

/// All ports of one robot plus its monotonic clock
///
/// Implemented by the board support layer (or the simulator). The core
/// borrows one port at a time and never holds a port across ticks.
pub trait Hardware {
    /// Borrow an actuator
    fn actuator(&mut self, id: ActuatorId) -> &mut dyn ActuatorPort;

    /// Borrow a position counter
    fn counter(&mut self, id: CounterId) -> &mut dyn PositionCounter;

    /// Borrow a limit switch
    fn switch(&mut self, id: SwitchId) -> &mut dyn LimitSwitch;

    /// Monotonic time since boot
    fn now(&self) -> Duration;
}
