//! Robot lifecycle controller
//!
//! The host runtime calls [`Robot::on_mode_enter`] once when a mode
//! starts and [`Robot::on_tick`] once per control period. The controller
//! picks the driver for the mode (sequencer or teleop mapper), applies
//! lift homing and the top-switch guard, clamps and dispatches the
//! commands, and publishes the dashboard.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::auton::{resolve, AutonomousSequencer, Selection};
use crate::config::RobotConfig;
use crate::control::{CommandSet, Mechanism};
use crate::telemetry;
use crate::teleop::{OperatorInput, TeleopMapper};
use crate::traits::link::{read_target, set_camera_mode, set_led_mode};
use crate::traits::{ActuatorId, CameraMode, CounterId, Hardware, LedMode, TelemetrySink, VisionLink};

/// Host operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Outputs disabled by the field
    #[default]
    Disabled,
    /// Unattended routine
    Autonomous,
    /// Operator driven
    Teleop,
    /// Pit test mode
    Test,
}

/// External collaborators supplied by the host on every call
pub trait Host {
    /// Joystick snapshot for this tick
    fn operator_input(&mut self) -> OperatorInput;

    /// Chooser and field data, read at autonomous entry
    fn selection(&mut self) -> Selection;

    /// Vision coprocessor table
    fn vision(&mut self) -> &mut dyn VisionLink;

    /// Driver dashboard
    fn telemetry(&mut self) -> &mut dyn TelemetrySink;
}

/// Robot controller
pub struct Robot<H: Hardware> {
    hardware: H,
    config: RobotConfig,
    mode: Mode,
    mechanism: Mechanism,
    sequencer: AutonomousSequencer,
    teleop: TeleopMapper,
    last_commands: CommandSet,
}

impl<H: Hardware> Robot<H> {
    /// Create a controller; zeroes every counter and stops every actuator
    pub fn new(mut hardware: H, config: RobotConfig) -> Self {
        for id in CounterId::ALL {
            hardware.counter(id).reset();
        }
        let stopped = CommandSet::stopped();
        stopped.apply(&mut hardware);

        Self {
            mechanism: Mechanism::new(&config),
            teleop: TeleopMapper::new(&config),
            sequencer: AutonomousSequencer::new(),
            hardware,
            config,
            mode: Mode::Disabled,
            last_commands: stopped,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Active configuration
    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Autonomous sequencer
    pub fn sequencer(&self) -> &AutonomousSequencer {
        &self.sequencer
    }

    /// Shared mechanisms
    pub fn mechanism(&self) -> &Mechanism {
        &self.mechanism
    }

    /// Commands dispatched on the last tick, before clamping
    pub fn last_commands(&self) -> &CommandSet {
        &self.last_commands
    }

    /// Borrow the hardware
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Borrow the hardware mutably (simulation and tests)
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// Release the hardware
    pub fn into_hardware(self) -> H {
        self.hardware
    }

    /// Enter a mode: reset per-mode state and stop everything
    pub fn on_mode_enter<O: Host + ?Sized>(&mut self, mode: Mode, host: &mut O) {
        log::info!("Entering {:?} (from {:?})", mode, self.mode);
        self.mode = mode;
        self.sequencer.reset();
        self.teleop.reset();
        self.dispatch(CommandSet::stopped());

        if mode == Mode::Autonomous {
            let selection = host.selection();
            let routine = resolve(selection, &self.config);
            self.mechanism.drive.reset_preset();
            telemetry::publish_selection(host.telemetry(), selection, routine.id);
            let now = self.hardware.now();
            self.sequencer.start(routine, now);
        }
    }

    /// Run one control period of `mode`
    ///
    /// A tick for a mode that was never entered enters it first.
    pub fn on_tick<O: Host + ?Sized>(&mut self, mode: Mode, host: &mut O) {
        if mode != self.mode {
            log::warn!("Tick for {:?} while in {:?}, entering it", mode, self.mode);
            self.on_mode_enter(mode, host);
        }

        let commands = match mode {
            Mode::Autonomous => self.autonomous_tick(host),
            Mode::Teleop => self.teleop_tick(host),
            Mode::Disabled | Mode::Test => {
                self.mechanism.lift.home(&mut self.hardware);
                CommandSet::stopped()
            }
        };
        self.dispatch(commands);
        self.publish(host);
    }

    fn autonomous_tick<O: Host + ?Sized>(&mut self, host: &mut O) -> CommandSet {
        let vision = host.vision();
        set_camera_mode(vision, CameraMode::Vision);
        set_led_mode(vision, LedMode::Off);
        let target = read_target(&*vision);
        telemetry::publish_vision(host.telemetry(), target);

        self.mechanism.lift.home(&mut self.hardware);
        let mut commands = self.sequencer.tick(&mut self.hardware, &self.mechanism);
        let top_clear = self.mechanism.lift.top_clear(&mut self.hardware);
        let lift = self.mechanism.lift.guard(commands.get(ActuatorId::Lift), top_clear);
        commands.set(ActuatorId::Lift, lift);
        commands
    }

    fn teleop_tick<O: Host + ?Sized>(&mut self, host: &mut O) -> CommandSet {
        let input = host.operator_input();
        let output = self.teleop.tick(&input, &mut self.hardware, &mut self.mechanism);
        if let Some(mode) = output.led_mode {
            set_led_mode(host.vision(), mode);
        }
        output.commands
    }

    fn dispatch(&mut self, commands: CommandSet) {
        commands.apply(&mut self.hardware);
        self.last_commands = commands;
    }

    fn publish<O: Host + ?Sized>(&mut self, host: &mut O) {
        let sink = host.telemetry();
        let now = self.hardware.now();
        telemetry::publish_sensors(&mut self.hardware, sink);
        telemetry::publish_drive(sink, self.mechanism.drive.preset(), self.mechanism.drive.scale());
        telemetry::publish_sequencer(sink, &self.sequencer, now);
    }
}
