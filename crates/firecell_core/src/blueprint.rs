//! Blueprint serialization
//!
//! A [`StateBlueprint`] is the saved form of a room: its name, size and the
//! elements it is built from. Blueprints are stored as RON.

use std::fs;
use std::io;
use std::path::Path;

use firecell_math::IVec3;
use firecell_model::{Material, State, StateError};
use serde::{Deserialize, Serialize};

use crate::{BlueprintValidator, Element, StateBuilder, ValidationError};

/// A named, serializable room description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateBlueprint {
    pub name: String,
    pub space_size: IVec3,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl StateBlueprint {
    /// Blueprint with no elements
    pub fn new(name: impl Into<String>, space_size: IVec3) -> Self {
        Self {
            name: name.into(),
            space_size,
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Wooden room with a concrete table and a small fire next to it
    pub fn demo(name: impl Into<String>) -> Self {
        Self::new(name, IVec3::new(20, 10, 20))
            .with_element(Element::room([0, 0], IVec3::new(20, 10, 20)))
            .with_element(Element::cuboid(
                IVec3::new(8, 1, 8),
                IVec3::new(4, 2, 4),
                Material::CellularConcrete,
            ))
            .with_element(Element::cuboid(IVec3::new(4, 1, 4), IVec3::new(2, 1, 2), Material::Wood))
            .with_element(Element::ignition(IVec3::new(4, 1, 4), IVec3::new(2, 1, 2)))
    }

    /// Load a blueprint from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BlueprintError> {
        let contents = fs::read_to_string(path)?;
        let blueprint = ron::from_str(&contents)?;
        Ok(blueprint)
    }

    /// Save a blueprint to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BlueprintError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Builder holding this blueprint's elements
    pub fn to_builder(&self) -> StateBuilder {
        let mut builder = StateBuilder::new(self.space_size);
        for element in &self.elements {
            builder.add_element(element.clone());
        }
        builder
    }

    /// Validate and build the initial state
    pub fn to_state(&self) -> Result<State, BlueprintError> {
        BlueprintValidator::validate_or_error(self).map_err(BlueprintError::Invalid)?;
        Ok(self.to_builder().build()?)
    }
}

/// Error loading, saving or building a blueprint
#[derive(Debug)]
pub enum BlueprintError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// Blueprint failed validation
    Invalid(Vec<ValidationError>),
    /// Built state was malformed
    State(StateError),
    /// Name cannot be used as a file name
    InvalidName(String),
}

impl From<io::Error> for BlueprintError {
    fn from(e: io::Error) -> Self {
        BlueprintError::Io(e)
    }
}

impl From<ron::error::SpannedError> for BlueprintError {
    fn from(e: ron::error::SpannedError) -> Self {
        BlueprintError::Parse(e)
    }
}

impl From<ron::Error> for BlueprintError {
    fn from(e: ron::Error) -> Self {
        BlueprintError::Serialize(e)
    }
}

impl From<StateError> for BlueprintError {
    fn from(e: StateError) -> Self {
        BlueprintError::State(e)
    }
}

impl std::fmt::Display for BlueprintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlueprintError::Io(e) => write!(f, "IO error: {}", e),
            BlueprintError::Parse(e) => write!(f, "Parse error: {}", e),
            BlueprintError::Serialize(e) => write!(f, "Serialize error: {}", e),
            BlueprintError::Invalid(errors) => {
                write!(f, "Invalid blueprint: ")?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", error)?;
                }
                Ok(())
            }
            BlueprintError::State(e) => write!(f, "State error: {}", e),
            BlueprintError::InvalidName(name) => write!(f, "Invalid blueprint name '{}'", name),
        }
    }
}

impl std::error::Error for BlueprintError {}
