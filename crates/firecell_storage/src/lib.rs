//! State storage for Firecell
//!
//! The engine publishes every state through [`StateConsumer`]; replay and
//! analysis read them back through [`StateProvider`].
//!
//! - [`InMemoryStorage`] - Keeps every state in a map
//! - [`FileSystemStorage`] - One file per state, written on a background thread
//! - [`BinaryStateSerializer`] - Checksummed little-endian state format
//! - [`SimulationStorage`] - Directory layout of stored simulations

mod error;
mod filesystem;
mod memory;
pub mod serializer;
mod simulation;

pub use error::StorageError;
pub use filesystem::FileSystemStorage;
pub use memory::InMemoryStorage;
pub use serializer::{BinaryStateSerializer, SerializationError, StateSerializer};
pub use simulation::{SimulationStorage, StoredSimulationConfig, CONFIG_FILE_NAME, STATES_DIR_NAME};

use firecell_model::State;

/// Receives states as the engine produces them
pub trait StateConsumer: Send + Sync {
    /// Store `state` as step `index`
    fn put_state(&self, state: State, index: u64) -> Result<(), StorageError>;
}

/// Hands out previously stored states
pub trait StateProvider: Send + Sync {
    /// The state stored as step `index`, if there is one
    fn get_state(&self, index: u64) -> Option<State>;
}
