//! Sequencer status machine
//!
//! Every sequencer decision is a function of the current status and one
//! event. Terminal statuses only leave on an explicit reset.

/// Why a routine was cut short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbortReason {
    /// The routine deadline passed
    Deadline,
    /// A phase outlived its ceiling on the routine clock
    PhaseLimit(u8),
}

/// Sequencer status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerStatus {
    /// No routine started
    #[default]
    Idle,
    /// Executing the phase at this index
    Running(u8),
    /// Every phase finished
    Completed,
    /// The watchdog ended the routine
    Aborted(AbortReason),
}

/// Events that drive the status machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerEvent {
    /// A routine with this many phases was started
    Start {
        /// Phases in the routine
        phases: u8,
    },
    /// The running phase met its exit condition
    PhaseComplete {
        /// Phases in the routine
        phases: u8,
    },
    /// The watchdog fired
    WatchdogExpired(AbortReason),
    /// Mode change: forget the run
    Reset,
}

impl SequencerStatus {
    /// Check if the sequencer may issue phase commands
    pub fn is_running(&self) -> bool {
        matches!(self, SequencerStatus::Running(_))
    }

    /// Check if the run is over (outputs held at all-stop)
    pub fn is_terminal(&self) -> bool {
        matches!(self, SequencerStatus::Completed | SequencerStatus::Aborted(_))
    }

    /// Index of the running phase
    pub fn phase(&self) -> Option<u8> {
        match self {
            SequencerStatus::Running(index) => Some(*index),
            _ => None,
        }
    }

    /// Short label for the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            SequencerStatus::Idle => "Idle",
            SequencerStatus::Running(_) => "Running",
            SequencerStatus::Completed => "Completed",
            SequencerStatus::Aborted(AbortReason::Deadline) => "Aborted: deadline",
            SequencerStatus::Aborted(AbortReason::PhaseLimit(_)) => "Aborted: phase limit",
        }
    }

    /// Process an event and return the next status
    pub fn transition(self, event: SequencerEvent) -> Self {
        use SequencerEvent::*;
        use SequencerStatus::*;

        match (self, event) {
            // Any status returns to idle on a mode change
            (_, Reset) => Idle,

            // An empty routine has nothing to wait for
            (Idle, Start { phases: 0 }) => Completed,
            (Idle, Start { .. }) => Running(0),

            (Running(index), PhaseComplete { phases }) => {
                if index.saturating_add(1) >= phases {
                    Completed
                } else {
                    Running(index + 1)
                }
            }
            (Running(_), WatchdogExpired(reason)) => Aborted(reason),

            // Default: stay in current status
            _ => self,
        }
    }
}
