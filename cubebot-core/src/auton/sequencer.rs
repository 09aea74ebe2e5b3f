//! Autonomous sequencer
//!
//! Waiting on a sensor never blocks: each tick evaluates the active
//! phase once and either advances, aborts, or repeats the phase command.
//! The watchdog bounds the whole run, so a jammed mechanism or a dead
//! encoder ends in an all-stop instead of a motor driven forever.

use core::time::Duration;

use super::phase::Phase;
use super::routine::Routine;
use super::status::{SequencerEvent, SequencerStatus};
use super::watchdog::{Watchdog, WatchdogStatus};
use crate::control::{CommandSet, Mechanism};
use crate::traits::Hardware;

/// Bookkeeping of one autonomous run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequencerState {
    /// Index of the active phase
    pub current_phase_index: usize,
    /// Time the active phase was entered
    pub phase_entered_at: Duration,
    /// Time the watchdog was armed
    pub watchdog_started_at: Duration,
    /// Every phase has finished
    pub completed: bool,
}

/// Tick-driven routine executor
#[derive(Debug, Clone, Default)]
pub struct AutonomousSequencer {
    routine: Option<Routine>,
    state: SequencerState,
    status: SequencerStatus,
    watchdog: Watchdog,
}

impl AutonomousSequencer {
    /// Create an idle sequencer
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status
    pub fn status(&self) -> SequencerStatus {
        self.status
    }

    /// Run bookkeeping
    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Routine of the current run
    pub fn routine(&self) -> Option<&Routine> {
        self.routine.as_ref()
    }

    /// Active phase, while running
    pub fn current_phase(&self) -> Option<&Phase> {
        if !self.status.is_running() {
            return None;
        }
        self.routine
            .as_ref()
            .and_then(|r| r.phase(self.state.current_phase_index))
    }

    /// Routine clock reading
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.watchdog.elapsed(now)
    }

    /// Forget any run and return to idle
    pub fn reset(&mut self) {
        self.routine = None;
        self.state = SequencerState::default();
        self.status = self.status.transition(SequencerEvent::Reset);
        self.watchdog.disarm();
    }

    /// Start a fresh run of `routine` at `now`
    pub fn start(&mut self, routine: Routine, now: Duration) {
        self.reset();
        self.watchdog.arm(now, routine.deadline);
        self.state.phase_entered_at = now;
        self.state.watchdog_started_at = now;

        let phases = phase_count(&routine);
        self.status = self.status.transition(SequencerEvent::Start { phases });
        self.state.completed = self.status == SequencerStatus::Completed;

        log::info!(
            "Autonomous {} ({:?}, side {}): {} phases, deadline {} ms",
            routine.id.label(),
            routine.variant,
            routine.side.letter(),
            phases,
            routine.deadline.as_millis()
        );
        self.routine = Some(routine);
    }

    /// Evaluate one control tick and return the commands to dispatch
    pub fn tick<H: Hardware + ?Sized>(&mut self, hw: &mut H, mechanism: &Mechanism) -> CommandSet {
        let Some(routine) = self.routine.as_ref() else {
            return CommandSet::stopped();
        };
        if !self.status.is_running() {
            return CommandSet::stopped();
        }

        let now = hw.now();
        let index = self.state.current_phase_index;
        let Some(phase) = routine.phase(index) else {
            return CommandSet::stopped();
        };

        let in_phase = now.saturating_sub(self.state.phase_entered_at);
        if phase.exit.is_satisfied(hw, in_phase) {
            if let Some(effect) = phase.on_exit {
                effect.apply(hw);
            }
            let phases = phase_count(routine);
            self.status = self.status.transition(SequencerEvent::PhaseComplete { phases });

            if self.status == SequencerStatus::Completed {
                self.state.completed = true;
                log::info!(
                    "Autonomous {} completed at {} ms",
                    routine.id.label(),
                    self.watchdog.elapsed(now).as_millis()
                );
                return CommandSet::stopped();
            }

            self.state.current_phase_index = index + 1;
            self.state.phase_entered_at = now;
            log::debug!(
                "Phase {} '{}' done, entering '{}'",
                index,
                phase.name,
                routine.phase(index + 1).map(|p| p.name).unwrap_or("?")
            );
        }

        let index = self.state.current_phase_index;
        let Some(phase) = routine.phase(index) else {
            return CommandSet::stopped();
        };

        let limit = phase.abort_after.map(|limit| (index as u8, limit));
        if let WatchdogStatus::Expired(reason) = self.watchdog.check(now, limit) {
            log::warn!(
                "Autonomous {} aborted in phase {} '{}': {:?} at {} ms",
                routine.id.label(),
                index,
                phase.name,
                reason,
                self.watchdog.elapsed(now).as_millis()
            );
            self.status = self.status.transition(SequencerEvent::WatchdogExpired(reason));
            return CommandSet::stopped();
        }

        phase.command.compose(mechanism)
    }
}

fn phase_count(routine: &Routine) -> u8 {
    u8::try_from(routine.len()).unwrap_or(u8::MAX)
}
