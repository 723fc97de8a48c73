//! Simulation model for Firecell
//!
//! - [`Material`] - What a cell is made of, with its thermal and fire properties
//! - [`ConductionMap`] - Heat conduction coefficient for every pair of materials
//! - [`Cell`] - One voxel of the room
//! - [`State`] - The whole room at one simulation step
//! - [`index`] - Flat/expanded index conversion and box ranges

mod cell;
mod conduction;
pub mod index;
mod material;
mod state;

pub use cell::{Cell, AMBIENT_TEMPERATURE, FULL_OXYGEN, MAX_SMOKE};
pub use conduction::{ConductionError, ConductionMap};
pub use index::IndexError;
pub use material::{Material, MatterState};
pub use state::{State, StateError};

pub use firecell_math::IVec3;
