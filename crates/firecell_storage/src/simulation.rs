//! Directory layout of stored simulations
//!
//! ```text
//! <base>/<name>/config.ron
//! <base>/<name>/states/<index>
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use firecell_math::IVec3;
use serde::{Deserialize, Serialize};

use crate::StorageError;

pub const CONFIG_FILE_NAME: &str = "config.ron";
pub const STATES_DIR_NAME: &str = "states";

/// Settings a simulation was run with, saved next to its states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSimulationConfig {
    /// Room blueprint the initial state was built from
    pub room_name: String,
    pub space_size: IVec3,
    /// Simulated seconds per step
    pub step_time: f64,
    #[serde(default)]
    pub step_limit: Option<u64>,
}

/// Locates and creates simulations under a base directory
#[derive(Debug, Clone)]
pub struct SimulationStorage {
    base: PathBuf,
}

impl SimulationStorage {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Directory of simulation `name`
    pub fn resolve_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_name(name)?;
        Ok(self.base.join(name))
    }

    /// Directory holding the state files of simulation `name`
    pub fn resolve_states_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.resolve_path(name)?.join(STATES_DIR_NAME))
    }

    /// Create the directories of a new simulation and write its config
    ///
    /// Returns the states directory. Fails if the simulation already has a
    /// config so runs are never mixed.
    pub fn initialize_simulation(
        &self,
        name: &str,
        config: &StoredSimulationConfig,
    ) -> Result<PathBuf, StorageError> {
        let directory = self.resolve_path(name)?;
        let config_path = directory.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Err(StorageError::AlreadyExists(directory));
        }

        let states = directory.join(STATES_DIR_NAME);
        fs::create_dir_all(&states)?;

        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let contents = ron::ser::to_string_pretty(config, pretty)?;
        fs::write(&config_path, contents)?;

        log::info!("Initialized simulation '{}' at {}", name, directory.display());
        Ok(states)
    }

    /// Config of a stored simulation
    pub fn read_stored_config(&self, name: &str) -> Result<StoredSimulationConfig, StorageError> {
        let path = self.resolve_path(name)?.join(CONFIG_FILE_NAME);
        let contents = fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    /// Names of all directories under the base that hold a simulation config, sorted
    ///
    /// A missing base directory simply has no simulations.
    pub fn find_stored_simulations(&self) -> Result<Vec<String>, StorageError> {
        if !self.base.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if !entry.path().join(CONFIG_FILE_NAME).is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn validate_name(name: &str) -> Result<(), StorageError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if bad {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StoredSimulationConfig {
        StoredSimulationConfig {
            room_name: "kitchen".to_string(),
            space_size: IVec3::new(10, 6, 8),
            step_time: 0.5,
            step_limit: Some(200),
        }
    }

    #[test]
    fn test_initialize_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SimulationStorage::new(dir.path());

        let states = storage.initialize_simulation("run-1", &config()).unwrap();
        assert_eq!(states, dir.path().join("run-1").join("states"));
        assert!(states.is_dir());
        assert_eq!(storage.read_stored_config("run-1").unwrap(), config());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SimulationStorage::new(dir.path());
        storage.initialize_simulation("run", &config()).unwrap();
        assert!(matches!(
            storage.initialize_simulation("run", &config()),
            Err(StorageError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_find_only_directories_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SimulationStorage::new(dir.path());
        storage.initialize_simulation("b", &config()).unwrap();
        storage.initialize_simulation("a", &config()).unwrap();
        fs::create_dir_all(dir.path().join("no-config")).unwrap();
        fs::write(dir.path().join("stray.txt"), "x").unwrap();

        assert_eq!(storage.find_stored_simulations().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_missing_base_has_no_simulations() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SimulationStorage::new(dir.path().join("nothing-here"));
        assert!(storage.find_stored_simulations().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_path_like_names() {
        let storage = SimulationStorage::new("/tmp/sims");
        assert!(storage.resolve_path("").is_err());
        assert!(storage.resolve_path("..").is_err());
        assert!(storage.resolve_path("a/b").is_err());
        assert_eq!(
            storage.resolve_states_path("fire").unwrap(),
            PathBuf::from("/tmp/sims/fire/states")
        );
    }

    #[test]
    fn test_missing_config_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SimulationStorage::new(dir.path());
        assert!(matches!(
            storage.read_stored_config("ghost"),
            Err(StorageError::Io(_))
        ));
    }
}
