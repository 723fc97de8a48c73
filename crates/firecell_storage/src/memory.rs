//! In-memory state storage

use std::collections::HashMap;

use firecell_model::State;
use parking_lot::RwLock;

use crate::{StateConsumer, StateProvider, StorageError};

/// Keeps every published state in memory
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    states: RwLock<HashMap<u64, State>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored states
    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }

    /// Highest stored index
    pub fn latest_index(&self) -> Option<u64> {
        self.states.read().keys().copied().max()
    }
}

impl StateConsumer for InMemoryStorage {
    fn put_state(&self, state: State, index: u64) -> Result<(), StorageError> {
        self.states.write().insert(index, state);
        Ok(())
    }
}

impl StateProvider for InMemoryStorage {
    fn get_state(&self, index: u64) -> Option<State> {
        self.states.read().get(&index).cloned()
    }
}
