//! Running and replaying simulations
//!
//! A [`Session`] ties the configuration to the library crates: it builds the
//! initial state from a room blueprint, drives the engine into a stored
//! simulation, and plays stored simulations back through the renderer.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use firecell_core::{BlueprintError, BlueprintLibrary, Diagnostics, Playback, PlayingMode};
use firecell_engine::{
    BasicAlgorithm, BasicEngine, ComputationStrategy, EngineError, SequentialComputation,
    SimulationConfig, ThreadPoolComputation,
};
use firecell_math::Vec3;
use firecell_render::{Camera, RenderMode};
use firecell_storage::{
    BinaryStateSerializer, FileSystemStorage, SimulationStorage, StateProvider, StorageError,
    StoredSimulationConfig,
};

use crate::config::{AppConfig, ComputationKind, ConfigError};

/// Error raised while running or replaying a simulation
#[derive(Debug)]
pub enum SessionError {
    Blueprint(BlueprintError),
    Storage(StorageError),
    Engine(EngineError),
    Config(ConfigError),
    /// The simulation has no stored states to replay
    NoStates(String),
    /// A run was asked to produce no states
    ZeroSteps,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Blueprint(e) => write!(f, "Room error: {}", e),
            SessionError::Storage(e) => write!(f, "Storage error: {}", e),
            SessionError::Engine(e) => write!(f, "Engine error: {}", e),
            SessionError::Config(e) => write!(f, "{}", e),
            SessionError::NoStates(name) => write!(f, "Simulation '{}' has no stored states", name),
            SessionError::ZeroSteps => write!(f, "A run needs at least one step"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Blueprint(e) => Some(e),
            SessionError::Storage(e) => Some(e),
            SessionError::Engine(e) => Some(e),
            SessionError::Config(e) => Some(e),
            SessionError::NoStates(_) | SessionError::ZeroSteps => None,
        }
    }
}

impl From<BlueprintError> for SessionError {
    fn from(e: BlueprintError) -> Self {
        SessionError::Blueprint(e)
    }
}

impl From<StorageError> for SessionError {
    fn from(e: StorageError) -> Self {
        SessionError::Storage(e)
    }
}

impl From<EngineError> for SessionError {
    fn from(e: EngineError) -> Self {
        SessionError::Engine(e)
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        SessionError::Config(e)
    }
}

/// Outcome of [`Session::run`]
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Name the simulation was stored under
    pub name: String,
    /// States written, indices `0..published`
    pub published: u64,
    /// Statistics of the last stored state
    pub last: Option<Diagnostics>,
}

/// One state shown during [`Session::replay`]
#[derive(Debug, Clone)]
pub struct ReplayFrame {
    pub index: u64,
    pub diagnostics: Diagnostics,
    /// Layer name and instance count, in draw order
    pub layers: Vec<(&'static str, usize)>,
}

pub struct Session {
    config: AppConfig,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn rooms(&self) -> BlueprintLibrary {
        BlueprintLibrary::new(&self.config.storage.rooms_dir)
    }

    pub fn simulations(&self) -> SimulationStorage {
        SimulationStorage::new(&self.config.storage.simulations_dir)
    }

    /// Simulate the room `room` and store every state
    ///
    /// Without a `name` the simulation is stored as `<room>-<unix seconds>`.
    /// `steps` overrides `simulation.max_steps`. Blocks until the engine
    /// reaches the step limit and all states are on disk.
    pub fn run(&self, room: &str, name: Option<&str>, steps: Option<u64>) -> Result<RunSummary, SessionError> {
        let settings = &self.config.simulation;
        let steps = steps.unwrap_or(settings.max_steps);
        if steps == 0 {
            return Err(SessionError::ZeroSteps);
        }
        let name = match name {
            Some(name) => name.to_string(),
            None => default_simulation_name(room),
        };

        let blueprint = self.rooms().load(room)?;
        let initial_state = blueprint.to_state()?;

        let stored = StoredSimulationConfig {
            room_name: blueprint.name.clone(),
            space_size: initial_state.space_size(),
            step_time: settings.step_time,
            step_limit: Some(steps),
        };
        let states_dir = self.simulations().initialize_simulation(&name, &stored)?;
        let storage = Arc::new(FileSystemStorage::new(states_dir, Arc::new(BinaryStateSerializer))?);

        let mut engine = BasicEngine::start(
            SimulationConfig::new(initial_state, settings.step_time).with_step_limit(steps),
            storage.clone(),
            Box::new(BasicAlgorithm::new(settings.step_time)),
            self.computation()?,
        )?;
        log::info!("Running '{}' from room '{}' for {} steps", name, room, steps);

        engine.wait();
        storage.flush();
        let published = engine.published();

        let last = published
            .checked_sub(1)
            .and_then(|index| storage.get_state(index))
            .map(|state| Diagnostics::from_state(&state));

        Ok(RunSummary { name, published, last })
    }

    /// Play a stored simulation from the first (or, backwards, the last) state
    ///
    /// `on_frame` sees each state as it is shown, with the layers the
    /// configured render mode builds for it. Returns the number of frames.
    pub fn replay(
        &self,
        name: &str,
        mode: PlayingMode,
        mut on_frame: impl FnMut(&ReplayFrame),
    ) -> Result<usize, SessionError> {
        let simulations = self.simulations();
        let stored = simulations.read_stored_config(name)?;
        let storage = Arc::new(FileSystemStorage::new(
            simulations.resolve_states_path(name)?,
            Arc::new(BinaryStateSerializer),
        )?);

        let indices = storage.stored_indices()?;
        let Some(&last) = indices.last() else {
            return Err(SessionError::NoStates(name.to_string()));
        };

        let render_mode = self.config.rendering.mode()?;
        let camera = self.camera(Vec3::from(stored.space_size));

        let mut playback = Playback::new(storage, stored.step_time);
        playback.set_mode(mode);
        if mode == PlayingMode::Backward {
            playback.seek(last);
        }

        let mut frames = 0;
        while playback.update(stored.step_time) {
            let Some((index, state)) = playback.current() else {
                break;
            };
            let layers = render_mode
                .build(state, &camera)
                .iter()
                .map(|batch| (batch.name, batch.len()))
                .collect();
            on_frame(&ReplayFrame {
                index,
                diagnostics: Diagnostics::from_state(state),
                layers,
            });
            frames += 1;

            let finished = match mode {
                PlayingMode::Forward => index >= last,
                PlayingMode::Backward => index == 0,
                PlayingMode::Paused => true,
            };
            if finished {
                break;
            }
        }

        log::info!("Replayed {} states of '{}'", frames, name);
        Ok(frames)
    }

    /// Camera from the configuration, framing the room unless a start position is set
    pub fn camera(&self, space_size: Vec3) -> Camera {
        let settings = &self.config.camera;
        let aspect_ratio = self.config.rendering.aspect_ratio;
        let mut camera = match settings.start_position {
            Some(position) => {
                let mut camera = Camera::new(Vec3::from(position), aspect_ratio);
                camera.look_at(space_size * 0.5);
                camera
            }
            None => Camera::framing(space_size, aspect_ratio),
        };
        camera.fov = settings.fov;
        camera.near = settings.near;
        camera.far = settings.far;
        camera.move_speed = settings.move_speed;
        camera
    }

    pub fn render_mode(&self) -> Result<RenderMode, SessionError> {
        Ok(self.config.rendering.mode()?)
    }

    fn computation(&self) -> Result<Box<dyn ComputationStrategy>, SessionError> {
        let settings = &self.config.simulation;
        Ok(match settings.computation {
            ComputationKind::Sequential => Box::new(SequentialComputation),
            ComputationKind::ThreadPool => {
                let pool = ThreadPoolComputation::new(settings.thread_count())?;
                log::debug!("Computing with {} threads", pool.threads());
                Box::new(pool)
            }
        })
    }
}

fn default_simulation_name(room: &str) -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{}-{}", room, seconds)
}
