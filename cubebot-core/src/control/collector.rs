//! Collector wheel composition

use super::CommandSet;
use crate::config::CollectorConfig;
use crate::traits::ActuatorId;

/// Discrete collector command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollectorMode {
    /// Pull a cube in
    Intake,
    /// Push a cube out
    Eject,
    /// Light inward bias that keeps a held cube seated
    IdleBias,
}

impl CollectorMode {
    /// Resolve the operator triggers; intake wins if both are held
    pub fn from_triggers(intake: bool, eject: bool) -> Self {
        if intake {
            CollectorMode::Intake
        } else if eject {
            CollectorMode::Eject
        } else {
            CollectorMode::IdleBias
        }
    }
}

/// Collector control
#[derive(Debug, Clone)]
pub struct CollectorControl {
    config: CollectorConfig,
}

impl CollectorControl {
    /// Create collector control from configuration
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// Configured intake speed
    pub fn collect_speed(&self) -> f32 {
        self.config.collect_speed
    }

    /// Run both wheels from one speed
    ///
    /// The right wheel faces the left one and is geared faster, so it
    /// turns the other way at a reduced ratio.
    pub fn run(&self, commands: &mut CommandSet, speed: f32) {
        commands.set(ActuatorId::CollectorLeft, speed);
        commands.set(ActuatorId::CollectorRight, -speed * self.config.right_ratio);
    }

    /// Apply a discrete collector mode
    pub fn apply(&self, commands: &mut CommandSet, mode: CollectorMode) {
        let collect = self.config.collect_speed;
        match mode {
            CollectorMode::Intake => self.run(commands, collect),
            CollectorMode::Eject => self.run(commands, -collect),
            CollectorMode::IdleBias => {
                commands.set(ActuatorId::CollectorLeft, collect * self.config.idle_left);
                commands.set(ActuatorId::CollectorRight, -collect * self.config.idle_right);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> CollectorControl {
        CollectorControl::new(CollectorConfig::default())
    }

    #[test]
    fn test_trigger_priority() {
        assert_eq!(CollectorMode::from_triggers(true, false), CollectorMode::Intake);
        assert_eq!(CollectorMode::from_triggers(false, true), CollectorMode::Eject);
        assert_eq!(CollectorMode::from_triggers(true, true), CollectorMode::Intake);
        assert_eq!(CollectorMode::from_triggers(false, false), CollectorMode::IdleBias);
    }

    #[test]
    fn test_run_mirrors_right_wheel() {
        let mut commands = CommandSet::stopped();
        collector().run(&mut commands, 1.0);
        assert_eq!(commands.get(ActuatorId::CollectorLeft), 1.0);
        assert_eq!(commands.get(ActuatorId::CollectorRight), -0.7);
    }

    #[test]
    fn test_modes() {
        let c = collector();
        let mut commands = CommandSet::stopped();

        c.apply(&mut commands, CollectorMode::Intake);
        assert_eq!(commands.get(ActuatorId::CollectorLeft), -1.0);
        assert_eq!(commands.get(ActuatorId::CollectorRight), 0.7);

        c.apply(&mut commands, CollectorMode::Eject);
        assert_eq!(commands.get(ActuatorId::CollectorLeft), 1.0);
        assert_eq!(commands.get(ActuatorId::CollectorRight), -0.7);

        c.apply(&mut commands, CollectorMode::IdleBias);
        assert_eq!(commands.get(ActuatorId::CollectorLeft), -0.375);
        assert_eq!(commands.get(ActuatorId::CollectorRight), 0.25);
    }
}
