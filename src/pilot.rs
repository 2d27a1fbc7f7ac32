use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::simulation::{Command, Lander};

/// Source of player commands for a session, queried once per tick.
pub trait CommandProvider {
    fn get_cmds(&mut self, tick: usize, lander: &Lander) -> Vec<Command>;
}

/// Mashes the controls at random.
pub struct RandomPilot {
    rng: StdRng,
    thrust_prob: f64,
    rotate_prob: f64,
}

impl RandomPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            thrust_prob: 0.5,
            rotate_prob: 0.05,
        }
    }

    pub fn with_thrust_prob(self, thrust_prob: f64) -> Self {
        assert!((0. ..=1.).contains(&thrust_prob));
        Self {
            thrust_prob,
            ..self
        }
    }
}

impl CommandProvider for RandomPilot {
    fn get_cmds(&mut self, _: usize, _: &Lander) -> Vec<Command> {
        let mut cmds = Vec::new();
        if self.rng.gen_bool(self.rotate_prob) {
            cmds.push(if self.rng.gen_bool(0.5) {
                Command::RotateLeft
            } else {
                Command::RotateRight
            });
        }
        if self.rng.gen_bool(self.thrust_prob) {
            cmds.push(Command::Thrust);
        }
        cmds
    }
}

/// Straightens the lander up and brakes whenever it sinks faster than
/// `max_vertical_speed`.
pub struct DescentPilot {
    max_vertical_speed: f64,
}

impl Default for DescentPilot {
    fn default() -> Self {
        Self {
            max_vertical_speed: 0.3,
        }
    }
}

impl DescentPilot {
    pub fn new(max_vertical_speed: f64) -> Self {
        Self { max_vertical_speed }
    }
}

impl CommandProvider for DescentPilot {
    fn get_cmds(&mut self, _: usize, lander: &Lander) -> Vec<Command> {
        let mut cmds = Vec::new();
        if lander.target_angle() < 0. {
            cmds.push(Command::RotateRight);
        } else if lander.target_angle() > 0. {
            cmds.push(Command::RotateLeft);
        }
        if lander.velocity().y > self.max_vertical_speed {
            cmds.push(Command::Thrust);
        }
        cmds
    }
}

#[cfg(test)]
mod pilot_tests {
    use super::*;
    use crate::simulation::{CollisionChecker, LanderState, Physics};

    fn lander(state: LanderState) -> Lander {
        Lander::new(state, Physics::default(), CollisionChecker::default())
    }

    #[test]
    fn random_pilot_is_reproducible() {
        let lander = lander(LanderState::default());
        let mut a = RandomPilot::new(7);
        let mut b = RandomPilot::new(7);
        for tick in 0..100 {
            assert_eq!(a.get_cmds(tick, &lander), b.get_cmds(tick, &lander));
        }
    }

    #[test]
    fn random_pilot_never_thrusts_at_zero_prob() {
        let lander = lander(LanderState::default());
        let mut pilot = RandomPilot::new(1).with_thrust_prob(0.);
        assert!((0..100).all(|tick| !pilot.get_cmds(tick, &lander).contains(&Command::Thrust)));
    }

    #[test]
    fn descent_pilot_brakes() {
        let mut pilot = DescentPilot::default();
        let falling = lander(LanderState::default().with_velocity(0., 0.4));
        assert_eq!(pilot.get_cmds(0, &falling), vec![Command::Thrust]);
        let slow = lander(LanderState::default().with_velocity(0., 0.2));
        assert!(pilot.get_cmds(0, &slow).is_empty());
    }

    #[test]
    fn descent_pilot_speed_target() {
        let mut pilot = DescentPilot::new(0.1);
        let sinking = lander(LanderState::default().with_velocity(0., 0.2));
        assert_eq!(pilot.get_cmds(0, &sinking), vec![Command::Thrust]);
        let rising = lander(LanderState::default().with_velocity(0., -0.2));
        assert!(pilot.get_cmds(0, &rising).is_empty());
    }

    #[test]
    fn descent_pilot_straightens_up() {
        let mut pilot = DescentPilot::default();
        let tilted = lander(LanderState::default().with_angle(-30.));
        assert_eq!(pilot.get_cmds(0, &tilted), vec![Command::RotateRight]);
        let tilted = lander(LanderState::default().with_angle(15.));
        assert_eq!(pilot.get_cmds(0, &tilted), vec![Command::RotateLeft]);
    }
}
