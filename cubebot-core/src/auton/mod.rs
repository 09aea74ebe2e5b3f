//! Autonomous routines
//!
//! Routines are data: an ordered table of gated phases per routine and
//! alliance side. The sequencer walks one routine per autonomous period,
//! one tick at a time, under a watchdog that bounds the whole run.

pub mod phase;
pub mod routine;
pub mod sequencer;
pub mod status;
pub mod watchdog;

pub use phase::{ExitCondition, OnExit, Phase, PhaseCommand, Threshold};
pub use routine::{resolve, AllianceSide, Routine, RoutineId, RoutineVariant, Selection};
pub use sequencer::{AutonomousSequencer, SequencerState};
pub use status::{AbortReason, SequencerEvent, SequencerStatus};
pub use watchdog::{Watchdog, WatchdogStatus};
