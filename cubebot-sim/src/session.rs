//! One simulated match
//!
//! Drives the lifecycle the field would: a short disabled period, the
//! autonomous period, then teleop under a driver script, stepping the
//! plant after every control tick.

use std::time::Duration;

use cubebot_core::auton::{Selection, SequencerStatus};
use cubebot_core::config::RobotConfig;
use cubebot_core::teleop::OperatorInput;
use cubebot_core::traits::{TelemetrySink, VisionLink};
use cubebot_core::{Host, Mode, Robot};

use crate::dashboard::{Dashboard, VisionTable};
use crate::plant::{Plant, PlantConfig};
use crate::script::DriverScript;

/// Control period of the robot loop
pub const PERIOD: Duration = Duration::from_millis(20);

/// Length of the autonomous period
pub const AUTONOMOUS: Duration = Duration::from_secs(15);

/// Disabled time before autonomous
const PRE_MATCH: Duration = Duration::from_millis(500);

/// Match settings
#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub config: RobotConfig,
    pub plant: PlantConfig,
    pub selection: Selection,
    pub teleop: Duration,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            config: RobotConfig::default(),
            plant: PlantConfig::default(),
            selection: Selection::default(),
            teleop: Duration::from_secs(10),
        }
    }
}

/// What the match left behind
#[derive(Debug)]
pub struct MatchReport {
    /// Sequencer status at the end of autonomous
    pub autonomous: SequencerStatus,
    /// Time into autonomous the sequencer reached a terminal status
    pub autonomous_done_at: Option<Duration>,
    /// Control ticks run
    pub ticks: u32,
    /// Final dashboard
    pub dashboard: Dashboard,
    /// Final camera table
    pub vision: VisionTable,
    /// Final plant
    pub plant: Plant,
}

/// Host side of the simulated field
struct SimHost {
    input: OperatorInput,
    selection: Selection,
    vision: VisionTable,
    dashboard: Dashboard,
}

impl Host for SimHost {
    fn operator_input(&mut self) -> OperatorInput {
        self.input
    }

    fn selection(&mut self) -> Selection {
        self.selection
    }

    fn vision(&mut self) -> &mut dyn VisionLink {
        &mut self.vision
    }

    fn telemetry(&mut self) -> &mut dyn TelemetrySink {
        &mut self.dashboard
    }
}

struct Field {
    robot: Robot<Plant>,
    host: SimHost,
    ticks: u32,
}

impl Field {
    /// Run `mode` for `length`, calling `each` after every tick with the
    /// time into the period
    fn period(&mut self, mode: Mode, length: Duration, mut each: impl FnMut(&mut Self, Duration)) {
        self.robot.on_mode_enter(mode, &mut self.host);
        let mut elapsed = Duration::ZERO;
        while elapsed < length {
            self.robot.on_tick(mode, &mut self.host);
            self.robot.hardware_mut().step(PERIOD);
            self.ticks += 1;
            elapsed += PERIOD;
            each(self, elapsed);
        }
    }
}

/// Play one match
pub fn run_match(options: &MatchOptions, script: &DriverScript) -> MatchReport {
    let plant = Plant::new(options.plant.clone());
    let mut field = Field {
        robot: Robot::new(plant, options.config),
        host: SimHost {
            input: OperatorInput::default(),
            selection: options.selection,
            vision: VisionTable::with_target(0.0, 0.0, 0.0),
            dashboard: Dashboard::default(),
        },
        ticks: 0,
    };

    field.period(Mode::Disabled, PRE_MATCH, |_, _| {});

    let mut done_at = None;
    field.period(Mode::Autonomous, AUTONOMOUS, |field, elapsed| {
        if done_at.is_none() && field.robot.sequencer().status().is_terminal() {
            done_at = Some(elapsed);
        }
    });
    let autonomous = field.robot.sequencer().status();
    log::info!(
        "Autonomous ended {} at {:?}",
        autonomous.label(),
        done_at.unwrap_or(AUTONOMOUS)
    );

    field.period(Mode::Teleop, options.teleop, |field, elapsed| {
        field.host.input = script.input_at(elapsed);
    });

    field.host.input = OperatorInput::default();
    field.period(Mode::Disabled, PERIOD, |_, _| {});

    let Field { robot, host, ticks } = field;
    MatchReport {
        autonomous,
        autonomous_done_at: done_at,
        ticks,
        dashboard: host.dashboard,
        vision: host.vision,
        plant: robot.into_hardware(),
    }
}
