//! Autonomous and lifecycle scenarios over the test plant

mod common;

use std::time::Duration;

use common::{Plant, TestHost, TICK};
use cubebot_core::auton::{
    AbortReason, AllianceSide, RoutineId, RoutineVariant, Selection, SequencerStatus,
};
use cubebot_core::config::RobotConfig;
use cubebot_core::telemetry::keys;
use cubebot_core::teleop::{bindings, Joystick};
use cubebot_core::traits::{ActuatorId, CounterId};
use cubebot_core::{Mode, Robot};

fn start(selection: Selection) -> (Robot<Plant>, TestHost) {
    start_with(selection, RobotConfig::default())
}

fn start_with(selection: Selection, config: RobotConfig) -> (Robot<Plant>, TestHost) {
    let mut robot = Robot::new(Plant::new(), config);
    let mut host = TestHost::new(selection);
    robot.on_mode_enter(Mode::Autonomous, &mut host);
    (robot, host)
}

/// Tick once, then let the plant respond
fn tick(robot: &mut Robot<Plant>, host: &mut TestHost, mode: Mode) {
    robot.on_tick(mode, host);
    robot.hardware_mut().step();
}

fn run_until_terminal(robot: &mut Robot<Plant>, host: &mut TestHost, limit: Duration) {
    while robot.hardware().now < limit && !robot.sequencer().status().is_terminal() {
        tick(robot, host, Mode::Autonomous);
    }
}

#[test]
fn test_cross_line_runs_to_completion() {
    let (mut robot, mut host) = start(Selection::new(RoutineId::CrossLine, AllianceSide::Unknown));
    let config = RobotConfig::default();

    // Phase 0: grip only
    tick(&mut robot, &mut host, Mode::Autonomous);
    let first = *robot.last_commands();
    assert_eq!(first.get(ActuatorId::CollectorLeft), -0.25);
    assert_eq!(first.get(ActuatorId::Lift), 0.0);
    assert_eq!(robot.sequencer().status(), SequencerStatus::Running(0));

    // Lift at full speed until past 8500
    let mut saw_lift = false;
    while robot.sequencer().status() != SequencerStatus::Running(2) {
        tick(&mut robot, &mut host, Mode::Autonomous);
        if robot.sequencer().status() == SequencerStatus::Running(1) {
            saw_lift = true;
            assert_eq!(robot.last_commands().get(ActuatorId::Lift), 1.0);
            assert_eq!(robot.last_commands().get(ActuatorId::DriveLeft), 0.0);
        }
        assert!(robot.hardware().now < Duration::from_secs(3));
    }
    assert!(saw_lift);
    assert!(robot.hardware().counters[CounterId::Lift.index()].travel > 8500.0);

    // Drive at the auto speeds
    let drive_started = robot.hardware().now;
    let scale = config.drive.fast_scale;
    assert_eq!(
        robot.last_commands().get(ActuatorId::DriveLeft),
        config.auto.left_speed * scale
    );
    assert_eq!(
        robot.last_commands().get(ActuatorId::DriveRight),
        -config.auto.right_speed * scale
    );

    run_until_terminal(&mut robot, &mut host, Duration::from_secs(10));
    assert_eq!(robot.sequencer().status(), SequencerStatus::Completed);
    let drive_time = robot.hardware().now - drive_started;
    assert!(drive_time > Duration::from_secs(5));
    assert!(drive_time < Duration::from_secs(5) + 3 * TICK);
    assert!(robot.hardware().all_stopped());

    // Stays stopped for the rest of the period
    for _ in 0..50 {
        tick(&mut robot, &mut host, Mode::Autonomous);
        assert!(robot.hardware().all_stopped());
    }
    assert_eq!(host.shown(keys::AUTO_STATUS), Some("Completed"));
}

#[test]
fn test_jammed_lift_aborts_at_deadline() {
    let (mut robot, mut host) = start(Selection::new(RoutineId::CrossLine, AllianceSide::Left));
    robot.hardware_mut().lift_jammed = true;

    run_until_terminal(&mut robot, &mut host, Duration::from_secs(12));
    assert_eq!(
        robot.sequencer().status(),
        SequencerStatus::Aborted(AbortReason::Deadline)
    );
    assert_eq!(robot.sequencer().state().current_phase_index, 1);

    // Aborted within one tick of the 8 s deadline
    let now = robot.hardware().now;
    assert!(now > Duration::from_secs(8));
    assert!(now <= Duration::from_secs(8) + 2 * TICK);
    assert!(robot.hardware().all_stopped());

    for _ in 0..25 {
        tick(&mut robot, &mut host, Mode::Autonomous);
        assert!(robot.hardware().all_stopped());
    }
    assert_eq!(host.shown(keys::AUTO_STATUS), Some("Aborted: deadline"));
}

#[test]
fn test_jammed_lift_hits_phase_limit_in_placement_routine() {
    let (mut robot, mut host) = start(Selection::new(RoutineId::CenterLeft, AllianceSide::Left));
    robot.hardware_mut().lift_jammed = true;

    run_until_terminal(&mut robot, &mut host, Duration::from_secs(15));
    assert_eq!(
        robot.sequencer().status(),
        SequencerStatus::Aborted(AbortReason::PhaseLimit(1))
    );
    assert!(robot.hardware().now <= Duration::from_secs(2) + 2 * TICK);
    assert!(robot.hardware().all_stopped());
}

#[test]
fn test_center_left_direct_leaves_lift_raised() {
    let (mut robot, mut host) = start(Selection::new(RoutineId::CenterLeft, AllianceSide::Left));
    run_until_terminal(&mut robot, &mut host, Duration::from_secs(15));

    assert_eq!(robot.sequencer().status(), SequencerStatus::Completed);
    assert_eq!(robot.sequencer().routine().map(|r| r.len()), Some(4));
    assert!(robot.hardware().height > 7_000.0);
    assert!(robot.hardware().all_stopped());
}

#[test]
fn test_center_left_direct_places_and_stows() {
    let mut config = RobotConfig::default();
    config.auto.stow_after_place = true;
    let (mut robot, mut host) = start_with(
        Selection::new(RoutineId::CenterLeft, AllianceSide::Left),
        config,
    );
    assert_eq!(
        robot.sequencer().routine().map(|r| r.variant),
        Some(RoutineVariant::Direct)
    );

    let mut ejected = false;
    while !robot.sequencer().status().is_terminal() && robot.hardware().now < Duration::from_secs(15) {
        tick(&mut robot, &mut host, Mode::Autonomous);
        if robot.sequencer().current_phase().map(|p| p.name) == Some("Place") {
            ejected |= robot.last_commands().get(ActuatorId::CollectorLeft) == 1.0;
        }
    }

    assert_eq!(robot.sequencer().status(), SequencerStatus::Completed);
    assert!(ejected);
    // Stowed on the bottom switch and homed
    assert_eq!(robot.hardware().height, 0.0);
    assert_eq!(host.shown(keys::LIFT_COUNT), Some("0"));
}

#[test]
fn test_center_left_fallback_skips_placement() {
    let (mut robot, mut host) = start(Selection::new(RoutineId::CenterLeft, AllianceSide::Right));
    assert_eq!(
        robot.sequencer().routine().map(|r| r.variant),
        Some(RoutineVariant::Fallback)
    );

    let mut collector_used = false;
    run_until_terminal(&mut robot, &mut host, Duration::from_secs(15));
    for write in &robot.hardware().ports[ActuatorId::CollectorLeft.index()].writes {
        collector_used |= *write != 0.0;
    }

    assert_eq!(robot.sequencer().status(), SequencerStatus::Completed);
    assert!(!collector_used);
    let right = &robot.hardware().counters[CounterId::DriveRight.index()];
    // Drive counters were reset after the lift and again after the drive
    assert!(right.resets >= 3);
}

#[test]
fn test_far_routines_turn_opposite_ways() {
    for (routine, side) in [
        (RoutineId::FarLeft, AllianceSide::Left),
        (RoutineId::FarRight, AllianceSide::Right),
    ] {
        let (mut robot, mut host) = start(Selection::new(routine, side));
        let mut turn = None;
        while !robot.sequencer().status().is_terminal() && robot.hardware().now < Duration::from_secs(15) {
            tick(&mut robot, &mut host, Mode::Autonomous);
            if robot.sequencer().current_phase().map(|p| p.name) == Some("Turn") {
                turn = Some(robot.last_commands().get(ActuatorId::DriveRight));
            }
        }
        assert_eq!(robot.sequencer().status(), SequencerStatus::Completed, "{:?}", routine);
        let turn = turn.unwrap_or(0.0);
        match routine {
            RoutineId::FarLeft => assert!(turn > 0.0),
            _ => assert!(turn < 0.0),
        }
    }
}

#[test]
fn test_nothing_routine_never_moves() {
    let (mut robot, mut host) = start(Selection::new(RoutineId::None, AllianceSide::Left));
    for _ in 0..100 {
        tick(&mut robot, &mut host, Mode::Autonomous);
        assert!(robot.hardware().all_stopped());
    }
    assert_eq!(robot.sequencer().status(), SequencerStatus::Completed);
}

#[test]
fn test_autonomous_writes_vision_modes_and_selection() {
    let (mut robot, mut host) = start(Selection::from_names("Far Left Auto", "RRL"));
    host.vision.numbers.insert("tx".to_string(), 3.25);
    tick(&mut robot, &mut host, Mode::Autonomous);

    assert_eq!(host.vision.numbers.get("camMode"), Some(&0.0));
    assert_eq!(host.vision.numbers.get("ledMode"), Some(&1.0));
    assert_eq!(host.shown(keys::VISION_X), Some("3.25"));
    assert_eq!(host.shown(keys::AUTO_SELECTED), Some("Far Left Auto"));
    assert_eq!(host.shown(keys::SWITCH_SIDE), Some("R"));
    assert_eq!(
        robot.sequencer().routine().map(|r| r.variant),
        Some(RoutineVariant::Fallback)
    );
}

#[test]
fn test_teleop_after_autonomous_starts_fresh() {
    let (mut robot, mut host) = start(Selection::new(RoutineId::CrossLine, AllianceSide::Left));
    run_until_terminal(&mut robot, &mut host, Duration::from_secs(10));

    robot.on_mode_enter(Mode::Teleop, &mut host);
    assert_eq!(robot.sequencer().status(), SequencerStatus::Idle);

    host.input.left = Joystick::new().press(bindings::HOOK_DEPLOY);
    host.input.right = Joystick::new().press(bindings::LED_BLINK);
    tick(&mut robot, &mut host, Mode::Teleop);
    assert_eq!(robot.hardware().speed(ActuatorId::Hook), 1.0);
    assert_eq!(host.vision.numbers.get("ledMode"), Some(&2.0));
    assert!(host.shown(keys::DRIVE_SPEED).is_some());
}

#[test]
fn test_teleop_homing_while_lowering() {
    let mut robot = Robot::new(Plant::new(), RobotConfig::default());
    let mut host = TestHost::new(Selection::default());
    robot.on_mode_enter(Mode::Teleop, &mut host);

    host.input.right = Joystick::new().press(bindings::LIFT_RAISE);
    for _ in 0..100 {
        tick(&mut robot, &mut host, Mode::Teleop);
    }
    assert!(robot.hardware().height > 10_000.0);

    host.input.right = Joystick::new().press(bindings::LIFT_LOWER);
    while robot.hardware().height > 0.0 {
        tick(&mut robot, &mut host, Mode::Teleop);
    }
    tick(&mut robot, &mut host, Mode::Teleop);
    assert_eq!(host.shown(keys::LIFT_COUNT), Some("0"));
    assert_eq!(host.dashboard.bools.get(keys::REED_BOTTOM), Some(&false));
}
