//! Room building and replay for Firecell
//!
//! - [`Element`] - Serializable building block of a room (cuboid, floor, room, ignition)
//! - [`StateBuilder`] - Turns a list of elements into an initial [`State`](firecell_model::State)
//! - [`StateBlueprint`] - Named, loadable/saveable room description
//! - [`BlueprintValidator`] - Static checks on blueprints
//! - [`BlueprintLibrary`] - Directory of saved blueprints
//! - [`Playback`] - Steps through stored states forward or backward
//! - [`Diagnostics`] - Aggregate statistics of a state

mod blueprint;
mod blueprint_library;
mod blueprint_validator;
mod diagnostics;
mod element;
mod playback;
mod state_builder;

pub use blueprint::{BlueprintError, StateBlueprint};
pub use blueprint_library::BlueprintLibrary;
pub use blueprint_validator::{BlueprintValidator, ValidationError};
pub use diagnostics::Diagnostics;
pub use element::Element;
pub use playback::{Playback, PlayingMode};
pub use state_builder::StateBuilder;
