use std::fmt::Display;

use log::{debug, info, trace};

use crate::history::LanderHistory;
use crate::pilot::CommandProvider;
use crate::simulation::*;

#[derive(Debug)]
pub enum Error {
    SimulationError(SimulationError),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SimulationError(e) => write!(f, "simulation failed: {e}"),
        }
    }
}

impl From<SimulationError> for Error {
    fn from(val: SimulationError) -> Self {
        Error::SimulationError(val)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlightState {
    Flying,
    Landed,
    Crashed(Landing),
}

impl FlightState {
    pub fn is_over(&self) -> bool {
        !matches!(self, FlightState::Flying)
    }
}

impl From<Landing> for FlightState {
    fn from(landing: Landing) -> Self {
        if landing.is_safe() {
            FlightState::Landed
        } else {
            FlightState::Crashed(landing)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub spawn: LanderState,
    pub physics: Physics,
    pub collision_checker: CollisionChecker,
    pub viewport: (f64, f64),
    /// Custom terrain; the built-in profile is used when absent.
    pub terrain: Option<Profile>,
}

impl Default for Settings {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            spawn: Lander::at(Vec2::new(400., 100.)).state().clone(),
            physics: Physics::default(),
            collision_checker: CollisionChecker::default(),
            viewport: (camera.rect.width, camera.rect.height),
            terrain: None,
        }
    }
}

/// One game attempt: owns the terrain, the lander and the camera following
/// it, and steps them in a fixed order every tick.
pub struct Session {
    settings: Settings,
    landscape: Landscape,
    lander: Lander,
    camera: Camera,
    flight_state: FlightState,
    history: LanderHistory,
    ticks: usize,
}

impl Session {
    pub fn new(settings: Settings) -> Result<Self, Error> {
        let landscape = match &settings.terrain {
            Some(profile) => Landscape::from_profile(profile)?,
            None => Landscape::default(),
        };
        info!(
            "Landscape ready: tile width {:.2}, height {:.2}, {} segments ({} landable)",
            landscape.tile_width(),
            landscape.height(),
            landscape.segments().len(),
            landscape.segments().iter().filter(|s| s.landable).count()
        );
        let (lander, camera) = Self::spawn(&settings, &landscape);
        let history = LanderHistory::with_initial_state(lander.state());
        Ok(Self {
            settings,
            landscape,
            lander,
            camera,
            flight_state: FlightState::Flying,
            history,
            ticks: 0,
        })
    }

    fn spawn(settings: &Settings, landscape: &Landscape) -> (Lander, Camera) {
        let lander = Lander::new(
            settings.spawn.clone(),
            settings.physics.clone(),
            settings.collision_checker.clone(),
        );
        let (width, height) = settings.viewport;
        let mut camera = Camera::new(width, height);
        camera.update(lander.position(), landscape);
        info!(
            "Lander spawned at ({:.1}, {:.1}) with {} fuel",
            lander.position().x,
            lander.position().y,
            lander.fuel()
        );
        (lander, camera)
    }

    /// Throws the current attempt away and starts a fresh one.
    pub fn reset(&mut self) {
        let (lander, camera) = Self::spawn(&self.settings, &self.landscape);
        self.history = LanderHistory::with_initial_state(lander.state());
        self.lander = lander;
        self.camera = camera;
        self.flight_state = FlightState::Flying;
        self.ticks = 0;
    }

    pub fn apply_command(&mut self, command: Command) {
        if self.flight_state.is_over() {
            debug!("Ignoring {command:?}, flight is over");
            return;
        }
        self.lander.apply_command(command);
    }

    /// Integrates the lander, moves the camera and tests for touchdown.
    pub fn tick(&mut self) -> Result<FlightState, Error> {
        if self.flight_state.is_over() {
            return Ok(self.flight_state.clone());
        }

        self.lander.tick(&self.landscape)?;
        self.camera.update(self.lander.position(), &self.landscape);
        let landing = self.lander.check_collision(&self.landscape)?;

        self.ticks += 1;
        self.history.append_lander_state(self.lander.state());
        trace!("Tick {}: {:?}", self.ticks, self.lander.state());

        if let Some(landing) = landing {
            let state = self.lander.state();
            match &landing {
                Landing::Correct => info!(
                    "Landed after {} ticks at x {:.1} with {} fuel left",
                    self.ticks, state.position.x, state.fuel
                ),
                crash => info!(
                    "Crashed after {} ticks at ({:.1}, {:.1}): {crash:?}",
                    self.ticks, state.position.x, state.position.y
                ),
            }
            self.flight_state = landing.into();
        }
        Ok(self.flight_state.clone())
    }

    /// Feeds `pilot` commands and ticks until the flight ends or `max_ticks`
    /// ticks have run.
    pub fn run(
        &mut self,
        pilot: &mut impl CommandProvider,
        max_ticks: usize,
    ) -> Result<FlightState, Error> {
        for _ in 0..max_ticks {
            if self.flight_state.is_over() {
                break;
            }
            for command in pilot.get_cmds(self.ticks, &self.lander) {
                self.apply_command(command);
            }
            self.tick()?;
        }
        Ok(self.flight_state.clone())
    }

    pub fn screen_position(&self, world: Vec2) -> Vec2 {
        world_to_screen(world, &self.camera, &self.landscape)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.settings.viewport = (width, height);
        self.camera
            .resize(width, height, self.lander.position(), &self.landscape);
    }

    pub fn landscape(&self) -> &Landscape {
        &self.landscape
    }

    pub fn lander(&self) -> &Lander {
        &self.lander
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn flight_state(&self) -> &FlightState {
        &self.flight_state
    }

    pub fn history(&self) -> &LanderHistory {
        &self.history
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
