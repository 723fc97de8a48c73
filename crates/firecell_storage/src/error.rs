//! Storage error type

use std::io;
use std::path::PathBuf;

use crate::SerializationError;

/// Error reading or writing stored simulations
#[derive(Debug)]
pub enum StorageError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// A state could not be encoded or decoded
    Serialization(SerializationError),
    /// A stored config file is not valid RON
    ConfigParse(ron::error::SpannedError),
    /// A config could not be written as RON
    ConfigSerialize(ron::Error),
    /// The background writer has shut down
    WriterClosed,
    /// Simulation directory already holds a config
    AlreadyExists(PathBuf),
    /// Name is empty or contains path separators
    InvalidName(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StorageError::ConfigParse(e) => write!(f, "Config parse error: {}", e),
            StorageError::ConfigSerialize(e) => write!(f, "Config serialize error: {}", e),
            StorageError::WriterClosed => write!(f, "State writer is closed"),
            StorageError::AlreadyExists(path) => {
                write!(f, "Simulation already exists at {}", path.display())
            }
            StorageError::InvalidName(name) => write!(f, "Invalid simulation name '{}'", name),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialization(e) => Some(e),
            StorageError::ConfigParse(e) => Some(e),
            StorageError::ConfigSerialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<SerializationError> for StorageError {
    fn from(e: SerializationError) -> Self {
        StorageError::Serialization(e)
    }
}

impl From<ron::error::SpannedError> for StorageError {
    fn from(e: ron::error::SpannedError) -> Self {
        StorageError::ConfigParse(e)
    }
}

impl From<ron::Error> for StorageError {
    fn from(e: ron::Error) -> Self {
        StorageError::ConfigSerialize(e)
    }
}
