//! Mathematics for the Firecell simulator
//!
//! ## Core Types
//!
//! - [`IVec3`] - Integer cell index in the simulation grid (Y is up)
//! - [`Vec3`] - 3D float vector used by the camera and renderer
//! - [`Mat4`] - Column-major 4x4 matrix for view/projection/model transforms

mod ivec3;
mod vec3;
pub mod mat4;

pub use ivec3::{Axis, IVec3};
pub use vec3::Vec3;
pub use mat4::Mat4;
