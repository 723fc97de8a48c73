//! Strategies for applying an algorithm to every cell of a state

use firecell_model::{index, Cell, State};
use rayon::prelude::*;

use crate::{Algorithm, EngineError};

/// Computes the next state by running an [`Algorithm`] over every cell
///
/// Every strategy must produce the same state for the same input.
pub trait ComputationStrategy: Send + Sync {
    fn compute(&self, state: &State, algorithm: &dyn Algorithm) -> Result<State, EngineError>;
}

/// One cell after another on the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialComputation;

impl ComputationStrategy for SequentialComputation {
    fn compute(&self, state: &State, algorithm: &dyn Algorithm) -> Result<State, EngineError> {
        let cells = state
            .indexed_cells()
            .map(|(index, _)| algorithm.compute(state, index))
            .collect::<Result<Vec<Cell>, _>>()?;
        Ok(State::new(cells, state.space_size())?)
    }
}

/// Cells split across a dedicated rayon pool
pub struct ThreadPoolComputation {
    pool: rayon::ThreadPool,
}

impl ThreadPoolComputation {
    /// Pool with `threads` workers, or one per core when `None`
    pub fn new(threads: Option<usize>) -> Result<Self, EngineError> {
        let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("compute-{}", i));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;
        log::debug!("Computation pool started with {} threads", pool.current_num_threads());
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl std::fmt::Debug for ThreadPoolComputation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPoolComputation")
            .field("threads", &self.threads())
            .finish()
    }
}

impl ComputationStrategy for ThreadPoolComputation {
    fn compute(&self, state: &State, algorithm: &dyn Algorithm) -> Result<State, EngineError> {
        let space_size = state.space_size();
        let cells = self.pool.install(|| {
            (0..state.len() as i64)
                .into_par_iter()
                .map(|flat| {
                    let index = index::expand_index(flat, space_size)?;
                    algorithm.compute(state, index)
                })
                .collect::<Result<Vec<Cell>, _>>()
        })?;
        Ok(State::new(cells, space_size)?)
    }
}
