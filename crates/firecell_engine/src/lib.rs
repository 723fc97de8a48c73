//! Simulation engine for Firecell
//!
//! This crate turns one [`State`](firecell_model::State) into the next:
//!
//! - [`Algorithm`] - Computes the next value of a single cell
//! - [`BasicAlgorithm`] - Heat, fire, smoke and oxygen propagation
//! - [`ComputationStrategy`] - Applies an algorithm to every cell (serially or on a thread pool)
//! - [`BasicEngine`] - Background thread publishing successive states to a consumer

pub mod algorithm;
pub mod computation;
mod engine;
mod error;

pub use algorithm::{Algorithm, BasicAlgorithm};
pub use computation::{ComputationStrategy, SequentialComputation, ThreadPoolComputation};
pub use engine::{BasicEngine, Engine, EnginePhase, SimulationConfig};
pub use error::EngineError;
