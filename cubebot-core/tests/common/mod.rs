//! Shared test plant for the integration tests
//!
//! A kinematic model just rich enough to exercise the sequencer: motor
//! speed moves the lift and drivetrain, encoders read physical travel
//! minus their last reset, and the reed switches open and close with
//! lift height.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use cubebot_core::auton::Selection;
use cubebot_core::teleop::OperatorInput;
use cubebot_core::traits::{
    ActuatorId, ActuatorPort, CounterId, Hardware, LimitSwitch, PositionCounter, SwitchId,
    TelemetrySink, VisionLink,
};
use cubebot_core::Host;

/// Control period
pub const TICK: Duration = Duration::from_millis(20);

/// Lift travel between the hard stops (counts)
pub const LIFT_TRAVEL: f32 = 30_000.0;

/// Lift encoder counts per second at full speed
pub const LIFT_RATE: f32 = 8_000.0;

/// Drive encoder counts per second at full output
pub const DRIVE_RATE: f32 = 600.0;

/// Actuator that records every value it was handed
#[derive(Default)]
pub struct RecordingPort {
    pub speed: f32,
    pub writes: Vec<f32>,
}

impl ActuatorPort for RecordingPort {
    fn set_speed(&mut self, value: f32) {
        self.speed = value;
        self.writes.push(value);
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

/// Encoder over a physical travel value
#[derive(Default)]
pub struct PlantCounter {
    pub travel: f32,
    pub offset: f32,
    pub rate: f32,
    pub resets: u32,
}

impl PositionCounter for PlantCounter {
    fn position(&mut self) -> i32 {
        (self.travel - self.offset) as i32
    }

    fn rate(&mut self) -> f32 {
        self.rate
    }

    fn reset(&mut self) {
        self.offset = self.travel;
        self.resets += 1;
    }
}

pub struct PlantSwitch {
    pub active: bool,
}

impl LimitSwitch for PlantSwitch {
    fn is_active(&mut self) -> bool {
        self.active
    }
}

/// Simulated robot
pub struct Plant {
    pub ports: [RecordingPort; ActuatorId::COUNT],
    pub counters: [PlantCounter; CounterId::COUNT],
    pub switches: [PlantSwitch; SwitchId::COUNT],
    /// Lift height above the bottom stop (counts)
    pub height: f32,
    /// Lift gearbox jammed: motor runs, nothing moves
    pub lift_jammed: bool,
    pub now: Duration,
}

impl Plant {
    /// Lift resting on the bottom switch
    pub fn new() -> Self {
        let mut plant = Self {
            ports: Default::default(),
            counters: Default::default(),
            switches: [PlantSwitch { active: true }, PlantSwitch { active: true }],
            height: 0.0,
            lift_jammed: false,
            now: Duration::ZERO,
        };
        plant.update_switches();
        plant
    }

    pub fn speed(&self, id: ActuatorId) -> f32 {
        self.ports[id.index()].speed
    }

    pub fn all_stopped(&self) -> bool {
        self.ports.iter().all(|p| p.speed == 0.0)
    }

    /// Every value any actuator was ever handed
    pub fn all_writes(&self) -> impl Iterator<Item = f32> + '_ {
        self.ports.iter().flat_map(|p| p.writes.iter().copied())
    }

    /// Advance physics by one tick using the current motor outputs
    pub fn step(&mut self) {
        let dt = TICK.as_secs_f32();

        let lift = self.speed(ActuatorId::Lift);
        let lift_counter = &mut self.counters[CounterId::Lift.index()];
        if self.lift_jammed {
            lift_counter.rate = 0.0;
        } else {
            let before = self.height;
            self.height = (self.height + lift * LIFT_RATE * dt).clamp(0.0, LIFT_TRAVEL);
            lift_counter.travel = self.height;
            lift_counter.rate = (self.height - before) / dt;
        }

        // Forward: left output positive, right output negative. The left
        // encoder is mounted mirrored and counts down going forward.
        let left = self.speed(ActuatorId::DriveLeft);
        let right = self.speed(ActuatorId::DriveRight);
        let left_counter = &mut self.counters[CounterId::DriveLeft.index()];
        left_counter.travel -= left * DRIVE_RATE * dt;
        left_counter.rate = -left * DRIVE_RATE;
        let right_counter = &mut self.counters[CounterId::DriveRight.index()];
        right_counter.travel -= right * DRIVE_RATE * dt;
        right_counter.rate = -right * DRIVE_RATE;

        self.update_switches();
        self.now += TICK;
    }

    fn update_switches(&mut self) {
        self.switches[SwitchId::LiftBottom.index()].active = self.height > 0.0;
        self.switches[SwitchId::LiftTop.index()].active = self.height < LIFT_TRAVEL;
    }
}

impl Hardware for Plant {
    fn actuator(&mut self, id: ActuatorId) -> &mut dyn ActuatorPort {
        &mut self.ports[id.index()]
    }

    fn counter(&mut self, id: CounterId) -> &mut dyn PositionCounter {
        &mut self.counters[id.index()]
    }

    fn switch(&mut self, id: SwitchId) -> &mut dyn LimitSwitch {
        &mut self.switches[id.index()]
    }

    fn now(&self) -> Duration {
        self.now
    }
}

/// Key/value table used for both the vision link and the dashboard
#[derive(Default)]
pub struct Table {
    pub numbers: HashMap<String, f64>,
    pub strings: HashMap<String, String>,
    pub bools: HashMap<String, bool>,
}

impl VisionLink for Table {
    fn put_number(&mut self, key: &str, value: f64) {
        self.numbers.insert(key.to_string(), value);
    }

    fn get_number(&self, key: &str, default: f64) -> f64 {
        self.numbers.get(key).copied().unwrap_or(default)
    }
}

impl TelemetrySink for Table {
    fn put_string(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.bools.insert(key.to_string(), value);
    }
}

/// Host with a fixed chooser selection and scripted joysticks
pub struct TestHost {
    pub input: OperatorInput,
    pub selection: Selection,
    pub vision: Table,
    pub dashboard: Table,
}

impl TestHost {
    pub fn new(selection: Selection) -> Self {
        Self {
            input: OperatorInput::default(),
            selection,
            vision: Table::default(),
            dashboard: Table::default(),
        }
    }

    pub fn shown(&self, key: &str) -> Option<&str> {
        self.dashboard.strings.get(key).map(String::as_str)
    }
}

impl Host for TestHost {
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
