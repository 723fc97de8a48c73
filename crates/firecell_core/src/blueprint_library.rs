//! Directory of saved blueprints, one `<name>.ron` per room

use std::fs;
use std::path::{Path, PathBuf};

use crate::{BlueprintError, StateBlueprint};

const EXTENSION: &str = "ron";

/// Saves and loads blueprints under a base directory
#[derive(Debug, Clone)]
pub struct BlueprintLibrary {
    base: PathBuf,
}

impl BlueprintLibrary {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// File a blueprint called `name` is stored in
    pub fn path(&self, name: &str) -> Result<PathBuf, BlueprintError> {
        if name.trim().is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(BlueprintError::InvalidName(name.to_string()));
        }
        Ok(self.base.join(format!("{}.{}", name, EXTENSION)))
    }

    /// Save under the blueprint's own name, replacing any existing file
    pub fn save(&self, blueprint: &StateBlueprint) -> Result<PathBuf, BlueprintError> {
        let path = self.path(&blueprint.name)?;
        fs::create_dir_all(&self.base)?;
        if let Err(e) = blueprint.save(&path) {
            log::error!(
                "Failed to save room '{}' with {} elements: {}",
                blueprint.name,
                blueprint.elements.len(),
                e
            );
            return Err(e);
        }
        log::info!("Saved room '{}'", blueprint.name);
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<StateBlueprint, BlueprintError> {
        let path = self.path(name)?;
        StateBlueprint::load(&path).map_err(|e| {
            log::error!("Failed to load room '{}': {}", name, e);
            e
        })
    }

    /// Names of all stored blueprints, sorted; empty if the directory is missing
    pub fn names(&self) -> Result<Vec<String>, BlueprintError> {
        if !self.base.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.is_empty() {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firecell_math::IVec3;

    #[test]
    fn test_save_list_load() {
        let dir = tempfile::tempdir().unwrap();
        let library = BlueprintLibrary::new(dir.path().join("rooms"));
        assert!(library.names().unwrap().is_empty());

        library.save(&StateBlueprint::demo("office")).unwrap();
        library.save(&StateBlueprint::new("attic", IVec3::new(4, 2, 4))).unwrap();
        fs::write(dir.path().join("rooms").join("notes.txt"), "skip me").unwrap();

        assert_eq!(library.names().unwrap(), vec!["attic", "office"]);
        assert_eq!(library.load("office").unwrap(), StateBlueprint::demo("office"));
    }

    #[test]
    fn test_missing_room() {
        let dir = tempfile::tempdir().unwrap();
        let library = BlueprintLibrary::new(dir.path());
        assert!(matches!(library.load("nope"), Err(BlueprintError::Io(_))));
    }

    #[test]
    fn test_bad_names_rejected() {
        let library = BlueprintLibrary::new("rooms");
        assert!(library.path("").is_err());
        assert!(library.path("../escape").is_err());
        assert!(library.path(".hidden").is_err());
        assert_eq!(library.path("kitchen").unwrap(), PathBuf::from("rooms/kitchen.ron"));
    }
}
