//! Routine phases
//!
//! A phase is one gated step: a command held every tick until its exit
//! condition holds, plus an optional side effect applied once on exit.

use core::time::Duration;

use crate::control::{CommandSet, Mechanism};
use crate::traits::{ActuatorId, CounterId, Hardware, SwitchId};

/// Comparison of a counter against a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Threshold {
    /// Position strictly above the value
    Above(i32),
    /// Position at or above the value
    AtLeast(i32),
    /// Position strictly below the value
    Below(i32),
    /// Distance from zero strictly above the value (turns in either direction)
    MagnitudeAbove(i32),
}

impl Threshold {
    /// Check a position against the threshold
    pub fn is_met(&self, position: i32) -> bool {
        match *self {
            Threshold::Above(v) => position > v,
            Threshold::AtLeast(v) => position >= v,
            Threshold::Below(v) => position < v,
            Threshold::MagnitudeAbove(v) => position.unsigned_abs() > v.unsigned_abs(),
        }
    }
}

/// Phase exit condition, evaluated every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCondition {
    /// A counter crossed a threshold (distance or height reached)
    PositionThreshold(CounterId, Threshold),
    /// Time in the phase exceeds the duration (fixed dwell)
    TimeDeadline(Duration),
    /// A switch reports the expected level (mechanical home)
    SwitchState(SwitchId, bool),
}

impl ExitCondition {
    /// Evaluate against live sensors
    pub fn is_satisfied<H: Hardware + ?Sized>(&self, hw: &mut H, in_phase: Duration) -> bool {
        match *self {
            ExitCondition::PositionThreshold(counter, threshold) => {
                threshold.is_met(hw.counter(counter).position())
            }
            ExitCondition::TimeDeadline(duration) => in_phase > duration,
            ExitCondition::SwitchState(switch, expected) => hw.switch(switch).is_active() == expected,
        }
    }
}

/// Side effect applied once when a phase completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OnExit {
    /// Zero one counter
    ResetCounter(CounterId),
    /// Zero both drivetrain counters
    ResetDriveCounters,
}

impl OnExit {
    /// Apply the effect
    pub fn apply<H: Hardware + ?Sized>(&self, hw: &mut H) {
        match *self {
            OnExit::ResetCounter(counter) => hw.counter(counter).reset(),
            OnExit::ResetDriveCounters => {
                hw.counter(CounterId::DriveLeft).reset();
                hw.counter(CounterId::DriveRight).reset();
            }
        }
    }
}

/// Actuator intent held for the duration of a phase
///
/// Drive inputs go through the tank drive composition and collector
/// speed through the collector composition, so autonomous and teleop
/// share sign conventions and scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseCommand {
    /// Tank drive inputs `(left, right)`, or stopped
    pub drive: Option<(f32, f32)>,
    /// Collector speed (see [`crate::control::CollectorControl::run`])
    pub collector: f32,
    /// Lift speed
    pub lift: f32,
    /// Climb winch speed
    pub climb: f32,
    /// Hook speed
    pub hook: f32,
}

impl PhaseCommand {
    /// Everything stopped
    pub const fn idle() -> Self {
        Self {
            drive: None,
            collector: 0.0,
            lift: 0.0,
            climb: 0.0,
            hook: 0.0,
        }
    }

    /// Set tank drive inputs
    pub const fn drive(mut self, left: f32, right: f32) -> Self {
        self.drive = Some((left, right));
        self
    }

    /// Set the collector speed
    pub const fn collector(mut self, speed: f32) -> Self {
        self.collector = speed;
        self
    }

    /// Set the lift speed
    pub const fn lift(mut self, speed: f32) -> Self {
        self.lift = speed;
        self
    }

    /// Compose the full command set through the shared primitives
    pub fn compose(&self, mechanism: &Mechanism) -> CommandSet {
        let mut commands = CommandSet::stopped();
        if let Some((left, right)) = self.drive {
            mechanism.drive.tank(&mut commands, left, right);
        }
        mechanism.collector.run(&mut commands, self.collector);
        commands.set(ActuatorId::Lift, self.lift);
        commands.set(ActuatorId::Climb, self.climb);
        commands.set(ActuatorId::Hook, self.hook);
        commands
    }
}

/// One step of a routine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    /// Dashboard label
    pub name: &'static str,
    /// Command issued every tick while the phase is active
    pub command: PhaseCommand,
    /// Condition that completes the phase
    pub exit: ExitCondition,
    /// Effect applied once on completion
    pub on_exit: Option<OnExit>,
    /// Ceiling for this phase on the routine clock
    pub abort_after: Option<Duration>,
}

impl Phase {
    /// Create a phase with no side effect and no ceiling
    pub const fn new(name: &'static str, command: PhaseCommand, exit: ExitCondition) -> Self {
        Self {
            name,
            command,
            exit,
            on_exit: None,
            abort_after: None,
        }
    }

    /// Apply an effect on completion
    pub const fn then(mut self, effect: OnExit) -> Self {
        self.on_exit = Some(effect);
        self
    }

    /// Abort the routine if this phase is still active at `limit` on the routine clock
    pub const fn abort_after(mut self, limit: Duration) -> Self {
        self.abort_after = Some(limit);
        self
    }
}
