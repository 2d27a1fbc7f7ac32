use std::fmt::Display;
use std::time::Duration;

use log::{debug, trace};

use super::{CollisionChecker, Landing, Landscape, Vec2};

pub(crate) mod defaults {
    use std::time::Duration;

    pub const G: f64 = 0.02;
    pub const THRUST_POWER: f64 = 0.04;
    pub const FUEL: u32 = 1000;
    pub const ANGLE_STEP: f64 = 15.;
    pub const ANGLE_LIMIT: f64 = 90.;
    pub const ROTATION_SPEED: f64 = 1.75;
    pub const ROTATION_DELAY: Duration = Duration::from_millis(150);
    // one frame at 120 fps
    pub const DT: Duration = Duration::from_nanos(1_000_000_000 / 120);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RotateLeft,
    RotateRight,
    Thrust,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rotate_left" | "left" => Some(Self::RotateLeft),
            "rotate_right" | "right" => Some(Self::RotateRight),
            "thrust" => Some(Self::Thrust),
            _ => None,
        }
    }
}

/// Kinematic snapshot of a lander.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LanderState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f64,
    pub fuel: u32,
}

impl LanderState {
    pub fn with_position(self, x: f64, y: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..self
        }
    }

    pub fn with_velocity(self, vx: f64, vy: f64) -> Self {
        Self {
            velocity: Vec2::new(vx, vy),
            ..self
        }
    }

    pub fn with_fuel(self, fuel: u32) -> Self {
        Self { fuel, ..self }
    }

    pub fn with_angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.angle.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    InvalidState { position: Vec2, velocity: Vec2 },
    InvalidLandscape(String),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState { position, velocity } => write!(
                f,
                "invalid lander state: position ({}, {}), velocity ({}, {})",
                position.x, position.y, velocity.x, velocity.y
            ),
            Self::InvalidLandscape(reason) => write!(f, "invalid landscape: {reason}"),
        }
    }
}

/// Tuning of the flight model. Velocities are in world units per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Physics {
    g: f64,
    thrust_power: f64,
    angle_step: f64,
    angle_limit: f64,
    rotation_speed: f64,
    rotation_delay: Duration,
    dt: Duration,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            g: defaults::G,
            thrust_power: defaults::THRUST_POWER,
            angle_step: defaults::ANGLE_STEP,
            angle_limit: defaults::ANGLE_LIMIT,
            rotation_speed: defaults::ROTATION_SPEED,
            rotation_delay: defaults::ROTATION_DELAY,
            dt: defaults::DT,
        }
    }
}

impl Physics {
    pub fn with_g(self, g: f64) -> Self {
        Self { g, ..self }
    }
    pub fn with_thrust_power(self, thrust_power: f64) -> Self {
        Self {
            thrust_power,
            ..self
        }
    }
    pub fn with_angle_step(self, angle_step: f64) -> Self {
        Self { angle_step, ..self }
    }
    pub fn with_angle_limit(self, angle_limit: f64) -> Self {
        assert!(angle_limit >= 0.);
        Self {
            angle_limit,
            ..self
        }
    }
    pub fn with_rotation_speed(self, rotation_speed: f64) -> Self {
        assert!(rotation_speed > 0.);
        Self {
            rotation_speed,
            ..self
        }
    }
    pub fn with_rotation_delay(self, rotation_delay: Duration) -> Self {
        Self {
            rotation_delay,
            ..self
        }
    }
    pub fn with_dt(self, dt: Duration) -> Self {
        assert!(!dt.is_zero());
        Self { dt, ..self }
    }

    /// Rotation delay rounded up to whole ticks, ignoring nanosecond
    /// truncation of `dt`.
    pub fn rotation_delay_ticks(&self) -> u32 {
        let ticks = self.rotation_delay.as_nanos() as f64 / self.dt.as_nanos() as f64;
        (ticks - 1e-3).ceil().max(0.) as u32
    }
}

#[derive(Debug, Clone)]
pub struct Lander {
    state: LanderState,
    target_angle: f64,
    landed: bool,
    ticks_since_rotation: Option<u32>,
    physics: Physics,
    collision_checker: CollisionChecker,
}

impl Lander {
    pub fn new(state: LanderState, physics: Physics, collision_checker: CollisionChecker) -> Self {
        Self {
            target_angle: state.angle,
            state,
            landed: false,
            ticks_since_rotation: None,
            physics,
            collision_checker,
        }
    }

    /// Lander at `position` with a full tank and default tuning.
    pub fn at(position: Vec2) -> Self {
        Self::new(
            LanderState::default()
                .with_position(position.x, position.y)
                .with_fuel(defaults::FUEL),
            Physics::default(),
            CollisionChecker::default(),
        )
    }

    pub fn state(&self) -> &LanderState {
        &self.state
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    pub fn fuel(&self) -> u32 {
        self.state.fuel
    }

    pub fn landed(&self) -> bool {
        self.landed
    }

    pub fn size(&self) -> f64 {
        self.collision_checker.half_extent()
    }

    pub fn apply_command(&mut self, command: Command) {
        if self.landed {
            trace!("Ignoring {command:?}, lander is down");
            return;
        }
        match command {
            Command::RotateLeft => self.rotate_left(),
            Command::RotateRight => self.rotate_right(),
            Command::Thrust => self.apply_thrust(),
        }
    }

    pub fn rotate_left(&mut self) {
        self.rotate_by(-self.physics.angle_step);
    }

    pub fn rotate_right(&mut self) {
        self.rotate_by(self.physics.angle_step);
    }

    fn rotate_by(&mut self, step: f64) {
        if let Some(ticks) = self.ticks_since_rotation {
            if ticks < self.physics.rotation_delay_ticks() {
                debug!("Rotation debounced, {ticks} ticks since the last one");
                return;
            }
        }
        let limit = self.physics.angle_limit;
        self.target_angle = (self.target_angle + step).clamp(-limit, limit);
        self.ticks_since_rotation = Some(0);
    }

    pub fn apply_thrust(&mut self) {
        if self.state.fuel == 0 {
            debug!("Thrust ignored, fuel tank empty");
            return;
        }
        let (sin, cos) = self.state.angle.to_radians().sin_cos();
        self.state.velocity.x += sin * self.physics.thrust_power;
        self.state.velocity.y -= cos * self.physics.thrust_power;
        self.state.fuel -= 1;
    }

    fn update_rotation(&mut self) {
        let (angle, target, speed) = (
            self.state.angle,
            self.target_angle,
            self.physics.rotation_speed,
        );
        if angle < target {
            self.state.angle = (angle + speed).min(target);
        } else if angle > target {
            self.state.angle = (angle - speed).max(target);
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if self.state.is_finite() {
            Ok(())
        } else {
            Err(SimulationError::InvalidState {
                position: self.state.position,
                velocity: self.state.velocity,
            })
        }
    }

    /// Advances the lander by one frame.
    pub fn tick(&mut self, landscape: &Landscape) -> Result<(), SimulationError> {
        self.validate()?;
        if let Some(ticks) = self.ticks_since_rotation.as_mut() {
            *ticks = ticks.saturating_add(1);
        }
        self.update_rotation();
        if self.landed {
            return Ok(());
        }

        let state = &mut self.state;
        state.velocity.y += self.physics.g;
        state.position = state.position.add(state.velocity);

        state.position.x = super::wrap(state.position.x, landscape.width());
        state.position.y = state.position.y.clamp(0., landscape.height());

        self.validate()
    }

    /// Tests the lander's bounding box against the terrain around it and
    /// latches `landed` on a safe touchdown.
    pub fn check_collision(
        &mut self,
        landscape: &Landscape,
    ) -> Result<Option<Landing>, SimulationError> {
        self.validate()?;
        let landing = self.collision_checker.check(landscape, &self.state);
        if let Some(Landing::Correct) = landing {
            self.landed = true;
        }
        Ok(landing)
    }
}
