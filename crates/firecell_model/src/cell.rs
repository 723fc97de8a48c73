//! A single voxel of the simulated room

use crate::{Material, MatterState};

/// Room temperature new cells start at
pub const AMBIENT_TEMPERATURE: f64 = 20.0;
/// Oxygen level of fresh air
pub const FULL_OXYGEN: f64 = 100.0;
/// Smoke indicator of a cell that cannot take any more smoke
pub const MAX_SMOKE: f64 = 100.0;

/// One cell of the simulation grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Steps this cell has been burning; 0 when not on fire
    pub burning_time: i32,
    /// Whether the cell can (still) burn
    pub flammable: bool,
    pub material: Material,
    /// Smoke density, 0..=100
    pub smoke_indicator: f64,
    /// Oxygen level, 0..=100
    pub oxygen_level: f64,
    /// How many more cells the flame column above this cell can reach
    pub remaining_fire_pillar: i32,
}

impl Cell {
    /// Fresh, non-burning cell with the material's defaults
    pub fn new(material: Material, temperature: f64) -> Self {
        let fluid = material.matter_state() == MatterState::Fluid;
        Self {
            temperature,
            burning_time: 0,
            flammable: material.is_flammable(),
            material,
            smoke_indicator: 0.0,
            oxygen_level: if fluid { FULL_OXYGEN } else { 0.0 },
            remaining_fire_pillar: material.fire_pillar_height(),
        }
    }

    /// Fresh cell at room temperature
    pub fn ambient(material: Material) -> Self {
        Self::new(material, AMBIENT_TEMPERATURE)
    }

    /// Air at room temperature
    pub fn air() -> Self {
        Self::ambient(Material::Air)
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_burning_time(mut self, burning_time: i32) -> Self {
        self.burning_time = burning_time;
        self
    }

    pub fn with_smoke(mut self, smoke_indicator: f64) -> Self {
        self.smoke_indicator = smoke_indicator;
        self
    }

    pub fn with_oxygen(mut self, oxygen_level: f64) -> Self {
        self.oxygen_level = oxygen_level;
        self
    }

    pub fn with_fire_pillar(mut self, remaining_fire_pillar: i32) -> Self {
        self.remaining_fire_pillar = remaining_fire_pillar;
        self
    }

    #[inline]
    pub fn is_fluid(&self) -> bool {
        self.material.matter_state() == MatterState::Fluid
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.material.matter_state() == MatterState::Solid
    }

    /// On fire right now
    #[inline]
    pub fn is_burning(&self) -> bool {
        self.flammable && self.burning_time > 0
    }
}
