//! Rendering support for Firecell states
//!
//! This crate turns a simulation [`State`](firecell_model::State) into
//! per-cube instance data that a GPU pipeline can draw directly.
//!
//! ## Key Components
//!
//! - [`Camera`] - First person camera with yaw/pitch and XZ-plane movement
//! - [`Transformation`] - Position/rotation/scale with a cached model matrix
//! - [`RenderMode`] - Selects which [`RenderStrategy`] lays out the scene
//! - [`RenderBatch`] - One named layer of [`CubeInstance`]s

pub mod camera;
pub mod color;
pub mod strategy;
pub mod transformation;

pub use camera::Camera;
pub use strategy::{
    CubeInstance, OxygenStrategy, RenderBatch, RenderMode, RenderStrategy, StandardStrategy,
    TemperatureAirStrategy, TemperatureSolidStrategy,
};
pub use transformation::Transformation;
