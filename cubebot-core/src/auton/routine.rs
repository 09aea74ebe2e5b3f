//! Routine table
//!
//! Each selectable routine maps to one or two table entries. Routines
//! that place a cube on the switch plate have a direct entry for the side
//! the plate is on and a shorter fallback entry (lift and drive only) for
//! the other side. The sequencer never branches on the side itself.

use core::time::Duration;

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::phase::{ExitCondition, OnExit, Phase, PhaseCommand, Threshold};
use crate::config::{seconds, RobotConfig};
use crate::traits::{CounterId, SwitchId};

/// Maximum phases per routine
pub const MAX_PHASES: usize = 8;

/// Selectable autonomous routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoutineId {
    /// Lift and drive across the auto line
    #[default]
    CrossLine,
    /// Start center, place on the left plate
    CenterLeft,
    /// Start center, place on the right plate
    CenterRight,
    /// Start far left, drive up and turn onto the left plate
    FarLeft,
    /// Start far right, drive up and turn onto the right plate
    FarRight,
    /// Sit still
    None,
}

impl RoutineId {
    /// All routines, in chooser order
    pub const ALL: [RoutineId; 6] = [
        RoutineId::CrossLine,
        RoutineId::CenterLeft,
        RoutineId::CenterRight,
        RoutineId::FarLeft,
        RoutineId::FarRight,
        RoutineId::None,
    ];

    /// Chooser label
    pub const fn label(self) -> &'static str {
        match self {
            RoutineId::CrossLine => "Cross Auto Line",
            RoutineId::CenterLeft => "Center Left Auto",
            RoutineId::CenterRight => "Center Right Auto",
            RoutineId::FarLeft => "Far Left Auto",
            RoutineId::FarRight => "Far Right Auto",
            RoutineId::None => "Literally Nothing",
        }
    }

    /// Short command-line tag
    pub const fn tag(self) -> &'static str {
        match self {
            RoutineId::CrossLine => "cross-line",
            RoutineId::CenterLeft => "center-left",
            RoutineId::CenterRight => "center-right",
            RoutineId::FarLeft => "far-left",
            RoutineId::FarRight => "far-right",
            RoutineId::None => "none",
        }
    }

    /// Parse a chooser label or tag, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.label().eq_ignore_ascii_case(name) || id.tag().eq_ignore_ascii_case(name))
    }
}

/// Side of the switch plate owned by our alliance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AllianceSide {
    /// Plate on the left
    Left,
    /// Plate on the right
    Right,
    /// Field data missing or unreadable
    #[default]
    Unknown,
}

impl AllianceSide {
    /// Parse the game-data string; only its first character matters
    pub fn from_game_data(data: &str) -> Self {
        match data.trim_start().chars().next() {
            Some('L') | Some('l') => AllianceSide::Left,
            Some('R') | Some('r') => AllianceSide::Right,
            _ => AllianceSide::Unknown,
        }
    }

    /// Single-letter form for the dashboard
    pub const fn letter(self) -> &'static str {
        match self {
            AllianceSide::Left => "L",
            AllianceSide::Right => "R",
            AllianceSide::Unknown => "?",
        }
    }
}

/// Operator choice delivered at autonomous entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selection {
    /// Chosen routine, if the chooser produced a known one
    pub routine: Option<RoutineId>,
    /// Plate side from field data
    pub side: AllianceSide,
}

impl Selection {
    /// Build a selection from a known routine
    pub const fn new(routine: RoutineId, side: AllianceSide) -> Self {
        Self {
            routine: Some(routine),
            side,
        }
    }

    /// Build a selection from the raw chooser and field strings
    pub fn from_names(routine: &str, game_data: &str) -> Self {
        Self {
            routine: RoutineId::from_name(routine),
            side: AllianceSide::from_game_data(game_data),
        }
    }
}

/// Which table entry a routine came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutineVariant {
    /// Same phases for either side
    Universal,
    /// Side matches the plate this routine scores on
    Direct,
    /// Side mismatch: lift and drive only
    Fallback,
}

/// A resolved routine, immutable for the autonomous period
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    /// Routine that actually runs (after defaulting)
    pub id: RoutineId,
    /// Side it was resolved for
    pub side: AllianceSide,
    /// Table entry kind
    pub variant: RoutineVariant,
    /// Absolute ceiling on the whole run
    pub deadline: Duration,
    phases: Vec<Phase, MAX_PHASES>,
}

impl Routine {
    /// Create a routine; phases past [`MAX_PHASES`] are dropped
    pub fn new(
        id: RoutineId,
        side: AllianceSide,
        variant: RoutineVariant,
        deadline: Duration,
        phases: &[Phase],
    ) -> Self {
        if phases.len() > MAX_PHASES {
            log::warn!("{} has {} phases, keeping {}", id.label(), phases.len(), MAX_PHASES);
        }
        let mut list = Vec::new();
        for phase in phases.iter().take(MAX_PHASES) {
            let _ = list.push(*phase);
        }
        Self {
            id,
            side,
            variant,
            deadline,
            phases: list,
        }
    }

    /// Phase by ordinal
    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// All phases in order
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Number of phases
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Check if the routine has no phases
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// Side filter of a table entry
#[derive(Debug, Clone, Copy)]
enum SideMatch {
    Any,
    Direct(AllianceSide),
    Fallback(AllianceSide),
}

impl SideMatch {
    fn accepts(self, side: AllianceSide) -> bool {
        match self {
            SideMatch::Any => true,
            SideMatch::Direct(s) | SideMatch::Fallback(s) => s == side,
        }
    }
}

type Builder = fn(RoutineId, AllianceSide, &RobotConfig) -> Routine;

struct RoutineEntry {
    id: RoutineId,
    side: SideMatch,
    build: Builder,
}

const ROUTINE_TABLE: [RoutineEntry; 10] = [
    RoutineEntry {
        id: RoutineId::CrossLine,
        side: SideMatch::Any,
        build: cross_line,
    },
    RoutineEntry {
        id: RoutineId::None,
        side: SideMatch::Any,
        build: nothing,
    },
    RoutineEntry {
        id: RoutineId::CenterLeft,
        side: SideMatch::Direct(AllianceSide::Left),
        build: center_direct,
    },
    RoutineEntry {
        id: RoutineId::CenterLeft,
        side: SideMatch::Fallback(AllianceSide::Right),
        build: fallback,
    },
    RoutineEntry {
        id: RoutineId::CenterRight,
        side: SideMatch::Direct(AllianceSide::Right),
        build: center_direct,
    },
    RoutineEntry {
        id: RoutineId::CenterRight,
        side: SideMatch::Fallback(AllianceSide::Left),
        build: fallback,
    },
    RoutineEntry {
        id: RoutineId::FarLeft,
        side: SideMatch::Direct(AllianceSide::Left),
        build: far_direct,
    },
    RoutineEntry {
        id: RoutineId::FarLeft,
        side: SideMatch::Fallback(AllianceSide::Right),
        build: fallback,
    },
    RoutineEntry {
        id: RoutineId::FarRight,
        side: SideMatch::Direct(AllianceSide::Right),
        build: far_direct,
    },
    RoutineEntry {
        id: RoutineId::FarRight,
        side: SideMatch::Fallback(AllianceSide::Left),
        build: fallback,
    },
];

/// Resolve a selection into a routine
///
/// A missing routine, or a side-dependent routine with an unknown side,
/// runs the cross-line routine instead.
pub fn resolve(selection: Selection, config: &RobotConfig) -> Routine {
    let Some(requested) = selection.routine else {
        log::warn!("No routine selected, running {}", RoutineId::CrossLine.label());
        return cross_line(RoutineId::CrossLine, selection.side, config);
    };

    let entry = ROUTINE_TABLE
        .iter()
        .find(|entry| entry.id == requested && entry.side.accepts(selection.side));

    match entry {
        Some(entry) => (entry.build)(entry.id, selection.side, config),
        None => {
            log::warn!(
                "{} has no entry for side {}, running {}",
                requested.label(),
                selection.side.letter(),
                RoutineId::CrossLine.label()
            );
            cross_line(RoutineId::CrossLine, selection.side, config)
        }
    }
}

/// Collector grip that keeps the cube seated while moving
fn grip(config: &RobotConfig) -> PhaseCommand {
    PhaseCommand::idle().collector(config.collector.collect_speed * config.auto.grip_fraction)
}

/// Forward drive at the trimmed auto speeds
fn forward(command: PhaseCommand, config: &RobotConfig) -> PhaseCommand {
    command.drive(-config.auto.left_speed, -config.auto.right_speed)
}

/// One-tick grip before anything moves
fn grip_phase(config: &RobotConfig) -> Phase {
    Phase::new("Grip", grip(config), ExitCondition::TimeDeadline(Duration::ZERO))
}

/// Eject the cube onto the plate, aborting at `limit_s` on the routine clock
fn place_phase(limit_s: f32, config: &RobotConfig) -> Phase {
    Phase::new(
        "Place",
        PhaseCommand::idle().collector(-config.collector.collect_speed),
        ExitCondition::TimeDeadline(seconds(config.auto.place_s)),
    )
    .abort_after(seconds(limit_s))
}

/// Lower the lift until the carriage reaches the bottom switch
fn stow_phase(config: &RobotConfig) -> Phase {
    Phase::new(
        "Stow",
        PhaseCommand::idle().lift(-config.lift.creep_lower_speed),
        ExitCondition::SwitchState(SwitchId::LiftBottom, false),
    )
}

/// Phases to keep from a placement list whose last entry is the stow
fn placement(phases: &[Phase], config: &RobotConfig) -> usize {
    if config.auto.stow_after_place {
        phases.len()
    } else {
        phases.len() - 1
    }
}

fn lift_phase(command: PhaseCommand, speed: f32, height: i32, config: &RobotConfig) -> Phase {
    Phase::new(
        "Lift",
        command.lift(speed),
        ExitCondition::PositionThreshold(CounterId::Lift, Threshold::Above(height)),
    )
    .then(OnExit::ResetDriveCounters)
    .abort_after(seconds(config.auto.lift_limit_s))
}

fn drive_phase(command: PhaseCommand, feet: f32, config: &RobotConfig) -> Phase {
    let counts = config.auto.counts(feet);
    Phase::new(
        "Drive",
        forward(command, config),
        ExitCondition::PositionThreshold(CounterId::DriveRight, Threshold::AtLeast(counts)),
    )
    .then(OnExit::ResetDriveCounters)
    .abort_after(seconds(config.auto.drive_limit_s))
}

fn cross_line(id: RoutineId, side: AllianceSide, config: &RobotConfig) -> Routine {
    let auto = &config.auto;
    let phases = [
        grip_phase(config),
        Phase::new(
            "Lift",
            grip(config).lift(auto.full_lift_speed),
            ExitCondition::PositionThreshold(CounterId::Lift, Threshold::Above(auto.full_height)),
        ),
        Phase::new(
            "Drive",
            forward(grip(config), config),
            ExitCondition::TimeDeadline(seconds(auto.cross_line_drive_s)),
        ),
    ];
    Routine::new(
        id,
        side,
        RoutineVariant::Universal,
        seconds(auto.cross_line_deadline_s),
        &phases,
    )
}

fn nothing(id: RoutineId, side: AllianceSide, _config: &RobotConfig) -> Routine {
    Routine::new(id, side, RoutineVariant::Universal, Duration::ZERO, &[])
}

fn center_direct(id: RoutineId, side: AllianceSide, config: &RobotConfig) -> Routine {
    let auto = &config.auto;
    let phases = [
        grip_phase(config),
        lift_phase(grip(config), auto.slow_lift_speed, auto.clear_height, config),
        drive_phase(grip(config), auto.center_distance_ft, config),
        place_phase(auto.place_limit_s, config),
        stow_phase(config),
    ];
    let used = placement(&phases, config);
    Routine::new(id, side, RoutineVariant::Direct, seconds(auto.deadline_s), &phases[..used])
}

fn far_direct(id: RoutineId, side: AllianceSide, config: &RobotConfig) -> Routine {
    let auto = &config.auto;
    let turn = auto.turn_speed;
    // Tank inputs: negative is forward on that side
    let (left, right) = match id {
        RoutineId::FarRight => (turn, -turn),
        _ => (-turn, turn),
    };
    let turn_counts = auto.counts(auto.turn_distance_ft);
    let phases = [
        grip_phase(config),
        lift_phase(grip(config), auto.full_lift_speed, auto.full_height, config),
        drive_phase(grip(config), auto.far_distance_ft, config),
        Phase::new(
            "Turn",
            grip(config).drive(left, right),
            ExitCondition::PositionThreshold(
                CounterId::DriveRight,
                Threshold::MagnitudeAbove(turn_counts),
            ),
        )
        .abort_after(seconds(auto.turn_limit_s)),
        place_phase(auto.far_place_limit_s, config),
        stow_phase(config),
    ];
    let used = placement(&phases, config);
    Routine::new(id, side, RoutineVariant::Direct, seconds(auto.deadline_s), &phases[..used])
}

fn fallback(id: RoutineId, side: AllianceSide, config: &RobotConfig) -> Routine {
    let auto = &config.auto;
    let phases = [
        lift_phase(PhaseCommand::idle(), auto.slow_lift_speed, auto.clear_height, config),
        drive_phase(PhaseCommand::idle(), auto.fallback_distance_ft, config),
    ];
    Routine::new(id, side, RoutineVariant::Fallback, seconds(auto.deadline_s), &phases)
}
