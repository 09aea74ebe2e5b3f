//! Kinematic robot plant
//!
//! Motor commands integrate straight into encoder counts each tick; no
//! inertia, no slip. The lift carriage moves between two hard stops and
//! the reed switches open and close with its height.

use std::time::Duration;

use cubebot_core::traits::{
    ActuatorId, ActuatorPort, CounterId, Hardware, LimitSwitch, PositionCounter, SwitchId,
};

/// Plant tuning
#[derive(Debug, Clone)]
pub struct PlantConfig {
    /// Lift travel between the hard stops (counts)
    pub lift_travel: f32,
    /// Lift counts per second at full command
    pub lift_rate: f32,
    /// Drive counts per second at full command
    pub drive_rate: f32,
    /// Lift motor runs but the carriage does not move
    pub stuck_lift: bool,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            lift_travel: 30_000.0,
            lift_rate: 8_000.0,
            drive_rate: 600.0,
            stuck_lift: false,
        }
    }
}

/// Simulated motor controller
#[derive(Debug, Default)]
pub struct SimMotor {
    speed: f32,
}

impl ActuatorPort for SimMotor {
    fn set_speed(&mut self, value: f32) {
        self.speed = value;
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

/// Simulated encoder: physical travel minus the travel at last reset
#[derive(Debug, Default)]
pub struct SimEncoder {
    travel: f32,
    zero: f32,
    rate: f32,
}

impl SimEncoder {
    fn advance(&mut self, delta: f32, dt: f32) {
        self.travel += delta;
        self.rate = delta / dt;
    }
}

impl PositionCounter for SimEncoder {
    fn position(&mut self) -> i32 {
        (self.travel - self.zero) as i32
    }

    fn rate(&mut self) -> f32 {
        self.rate
    }

    fn reset(&mut self) {
        self.zero = self.travel;
    }
}

/// Simulated reed switch
#[derive(Debug, Default)]
pub struct SimSwitch {
    open: bool,
}

impl LimitSwitch for SimSwitch {
    fn is_active(&mut self) -> bool {
        self.open
    }
}

/// The whole simulated robot
#[derive(Debug)]
pub struct Plant {
    config: PlantConfig,
    motors: [SimMotor; ActuatorId::COUNT],
    encoders: [SimEncoder; CounterId::COUNT],
    switches: [SimSwitch; SwitchId::COUNT],
    lift_height: f32,
    now: Duration,
}

impl Plant {
    /// Plant at rest with the lift on its bottom stop
    pub fn new(config: PlantConfig) -> Self {
        let mut plant = Self {
            config,
            motors: Default::default(),
            encoders: Default::default(),
            switches: Default::default(),
            lift_height: 0.0,
            now: Duration::ZERO,
        };
        plant.sense_lift();
        plant
    }

    /// Current motor command
    pub fn motor(&self, id: ActuatorId) -> f32 {
        self.motors[id.index()].speed
    }

    /// Lift height above the bottom stop (counts)
    pub fn lift_height(&self) -> f32 {
        self.lift_height
    }

    /// Distance driven by one side since start (counts, forward positive)
    pub fn odometer(&self, id: CounterId) -> f32 {
        let encoder = &self.encoders[id.index()];
        match id {
            CounterId::DriveLeft => -encoder.travel,
            _ => encoder.travel,
        }
    }

    /// Jam or free the lift gearbox
    pub fn set_stuck_lift(&mut self, stuck: bool) {
        self.config.stuck_lift = stuck;
    }

    /// Advance by `dt` using the current motor commands
    pub fn step(&mut self, dt: Duration) {
        let secs = dt.as_secs_f32();

        let lift = self.motor(ActuatorId::Lift);
        let target = if self.config.stuck_lift {
            self.lift_height
        } else {
            (self.lift_height + lift * self.config.lift_rate * secs)
                .clamp(0.0, self.config.lift_travel)
        };
        let moved = target - self.lift_height;
        self.lift_height = target;
        self.encoders[CounterId::Lift.index()].advance(moved, secs);

        // Forward is left positive, right negative. Both encoders count
        // the opposite way to their motor command.
        let drive = self.config.drive_rate * secs;
        let left = self.motor(ActuatorId::DriveLeft);
        let right = self.motor(ActuatorId::DriveRight);
        self.encoders[CounterId::DriveLeft.index()].advance(-left * drive, secs);
        self.encoders[CounterId::DriveRight.index()].advance(-right * drive, secs);

        self.sense_lift();
        self.now += dt;
    }

    fn sense_lift(&mut self) {
        // The carriage magnet closes a switch only while it sits on that stop
        self.switches[SwitchId::LiftBottom.index()].open = self.lift_height > 0.0;
        self.switches[SwitchId::LiftTop.index()].open = self.lift_height < self.config.lift_travel;
    }
}

impl Hardware for Plant {
    fn actuator(&mut self, id: ActuatorId) -> &mut dyn ActuatorPort {
        &mut self.motors[id.index()]
    }

    fn counter(&mut self, id: CounterId) -> &mut dyn PositionCounter {
        &mut self.encoders[id.index()]
    }

    fn switch(&mut self, id: SwitchId) -> &mut dyn LimitSwitch {
        &mut self.switches[id.index()]
    }

    fn now(&self) -> Duration {
        self.now
    }
}
