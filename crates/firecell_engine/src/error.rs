//! Engine error type

use std::io;

use firecell_model::{IndexError, StateError};

/// Error raised while computing or running a simulation
#[derive(Debug)]
pub enum EngineError {
    /// A cell index fell outside the state
    Index(IndexError),
    /// A computed state was malformed
    State(StateError),
    /// The rayon pool could not be created
    ThreadPool(rayon::ThreadPoolBuildError),
    /// The engine thread could not be spawned
    Spawn(io::Error),
    /// The conduction table is incomplete
    Conduction(firecell_model::ConductionError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Index(e) => write!(f, "Index error: {}", e),
            EngineError::State(e) => write!(f, "State error: {}", e),
            EngineError::ThreadPool(e) => write!(f, "Thread pool error: {}", e),
            EngineError::Spawn(e) => write!(f, "Failed to spawn engine thread: {}", e),
            EngineError::Conduction(e) => write!(f, "Conduction table error: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Index(e) => Some(e),
            EngineError::State(e) => Some(e),
            EngineError::ThreadPool(e) => Some(e),
            EngineError::Spawn(e) => Some(e),
            EngineError::Conduction(e) => Some(e),
        }
    }
}

impl From<IndexError> for EngineError {
    fn from(e: IndexError) -> Self {
        EngineError::Index(e)
    }
}

impl From<StateError> for EngineError {
    fn from(e: StateError) -> Self {
        EngineError::State(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for EngineError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        EngineError::ThreadPool(e)
    }
}

impl From<firecell_model::ConductionError> for EngineError {
    fn from(e: firecell_model::ConductionError) -> Self {
        EngineError::Conduction(e)
    }
}
