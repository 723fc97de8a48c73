//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`FIRECELL_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use firecell_render::RenderMode;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine configuration
    #[serde(default)]
    pub simulation: SimulationSettings,
    /// Where rooms and simulations live
    #[serde(default)]
    pub storage: StorageConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Natives classifier override
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`FIRECELL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // FIRECELL_SIMULATION__MAX_STEPS=50 -> simulation.max_steps = 50
        figment = figment.merge(Env::prefixed("FIRECELL_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, deep inside the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.step_time.is_nan() || self.simulation.step_time <= 0.0 {
            return Err(ConfigError::new(format!(
                "simulation.step_time must be positive, got {}",
                self.simulation.step_time
            )));
        }
        if self.simulation.max_steps == 0 {
            return Err(ConfigError::new("simulation.max_steps must be at least 1"));
        }
        self.rendering.mode()?;
        Ok(())
    }
}

/// How the next state is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComputationKind {
    Sequential,
    #[default]
    ThreadPool,
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Simulated seconds per step
    pub step_time: f64,
    /// States a run publishes unless the command line says otherwise
    pub max_steps: u64,
    /// Sequential or thread pool computation
    pub computation: ComputationKind,
    /// Worker threads for the pool (0 = one per core)
    pub threads: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            step_time: 0.5,
            max_steps: 120,
            computation: ComputationKind::ThreadPool,
            threads: 0,
        }
    }
}

impl SimulationSettings {
    /// Pool size, `None` for rayon's default
    pub fn thread_count(&self) -> Option<usize> {
        (self.threads > 0).then_some(self.threads)
    }
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory of stored simulations
    pub simulations_dir: PathBuf,
    /// Directory of room blueprints
    pub rooms_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            simulations_dir: PathBuf::from("simulations"),
            rooms_dir: PathBuf::from("rooms"),
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]; the room is framed when unset
    pub start_position: Option<[f32; 3]>,
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Movement speed (cells per second)
    pub move_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: None,
            fov: firecell_render::camera::FOV_DEGREES,
            near: firecell_render::camera::NEAR_PLANE,
            far: firecell_render::camera::FAR_PLANE,
            move_speed: firecell_render::camera::MOVING_SPEED,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// standard, temperature-air, temperature-solid or oxygen
    pub render_mode: String,
    /// Viewport width / height
    pub aspect_ratio: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Standard.name().to_string(),
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl RenderingConfig {
    pub fn mode(&self) -> Result<RenderMode, ConfigError> {
        self.render_mode
            .parse()
            .map_err(|e: String| ConfigError::new(format!("rendering.render_mode: {}", e)))
    }
}

/// Platform configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Natives classifier to use instead of detecting the host
    pub natives: Option<String>,
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::new(e.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.step_time, 0.5);
        assert_eq!(config.simulation.computation, ComputationKind::ThreadPool);
        assert_eq!(config.simulation.thread_count(), None);
        assert_eq!(config.camera.fov, 60.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("step_time"));
        assert!(toml.contains("computation = \"thread-pool\""));
        assert!(toml.contains("simulations_dir"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        config.simulation.step_time = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.rendering.render_mode = "infrared".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("infrared"));
    }

    #[test]
    fn test_explicit_thread_count() {
        let settings = SimulationSettings {
            threads: 3,
            ..SimulationSettings::default()
        };
        assert_eq!(settings.thread_count(), Some(3));
    }
}
