//! Cell materials

use serde::{Deserialize, Serialize};

/// Physical state of a material
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatterState {
    /// Conducts heat to solid neighbours
    Solid,
    /// Carries heat by convection, holds smoke and oxygen
    Fluid,
}

/// Material of a cell
///
/// Each material carries its fire properties. Temperatures are in degrees
/// Celsius. Adding a material means adding its row to every property below
/// and its pairs to [`ConductionMap`](crate::ConductionMap).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    Air,
    Wood,
    CellularConcrete,
}

impl Material {
    /// All materials, in declaration order
    pub const ALL: [Material; 3] = [Material::Air, Material::Wood, Material::CellularConcrete];

    /// Temperature above which a cell ignites when a neighbour has been burning for a while
    pub fn ignition_temperature(self) -> f64 {
        match self {
            Material::Air => 0.0,
            Material::Wood => 3.0,
            Material::CellularConcrete => 10000.0,
        }
    }

    /// Temperature above which a cell ignites on its own
    pub fn auto_ignition_temperature(self) -> f64 {
        match self {
            Material::Air => 0.0,
            Material::Wood => 250.0,
            Material::CellularConcrete => 10000.0,
        }
    }

    /// Temperature a burning cell of this material is held at
    pub fn burning_temperature(self) -> f64 {
        match self {
            Material::Air => 900.0,
            Material::Wood => 550.0,
            Material::CellularConcrete => 0.0,
        }
    }

    /// Smoke emitted per step into the cell above a burning cell
    ///
    /// Side neighbours receive a quarter of it (integer division).
    pub fn smoke_coefficient(self) -> i32 {
        match self {
            Material::Air => 0,
            Material::Wood => 20,
            Material::CellularConcrete => 0,
        }
    }

    pub fn matter_state(self) -> MatterState {
        match self {
            Material::Air => MatterState::Fluid,
            Material::Wood | Material::CellularConcrete => MatterState::Solid,
        }
    }

    /// Whether a fresh cell of this material can catch fire
    pub fn is_flammable(self) -> bool {
        !matches!(self, Material::CellularConcrete)
    }

    /// Height of the flame column a burning cell of this material feeds
    pub fn fire_pillar_height(self) -> i32 {
        match self {
            Material::Wood => 5,
            Material::Air | Material::CellularConcrete => 0,
        }
    }

    /// Stable numeric id used by the binary state format
    pub fn id(self) -> u8 {
        match self {
            Material::Air => 0,
            Material::Wood => 1,
            Material::CellularConcrete => 2,
        }
    }

    /// Inverse of [`Material::id`]
    pub fn from_id(id: u8) -> Option<Self> {
        Material::ALL.into_iter().find(|m| m.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Material::Air => "air",
            Material::Wood => "wood",
            Material::CellularConcrete => "cellular concrete",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
