//! Per-cell update rules
//!
//! [`BasicAlgorithm`] combines four propagators, each reading only the
//! previous state:
//!
//! - [`temperature`] - conduction between solids, convection in air and the
//!   sideways spread of hot gas under a ceiling
//! - [`fire`] - ignition, burnout and the flame column above burning cells
//! - [`smoke`] - smoke rising from fires and spreading through air
//! - [`oxygen`] - diffusion through air and consumption by flames

pub mod fire;
pub mod oxygen;
pub mod smoke;
pub mod temperature;

use firecell_math::IVec3;
use firecell_model::{Cell, ConductionError, ConductionMap, IndexError, State};

/// Steps a flammable solid burns before it is spent
pub const MAX_BURNING_TIME: i32 = 60;
/// Steps a neighbour must have been burning before it can ignite this cell
pub const NEIGHBOUR_BURNING_TIME_TO_IGNITE: i32 = 10;
/// Share of a vertical air temperature difference moved per second
pub const CONVECTION_COEFFICIENT: f64 = 0.3;
/// Above this temperature a ceiling cell counts as blocked for rising heat
pub const CEILING_HEAT_THRESHOLD: f64 = 100.0;
/// Oxygen burnt per second by a flaming air cell
pub const OXYGEN_USAGE_IN_FIRE: f64 = 5.0;

/// Computes the next value of a single cell from the previous state
pub trait Algorithm: Send + Sync {
    fn compute(&self, state: &State, index: IVec3) -> Result<Cell, IndexError>;
}

/// Heat, fire, smoke and oxygen propagation
#[derive(Debug, Clone)]
pub struct BasicAlgorithm {
    step_time: f64,
    conduction: ConductionMap,
}

impl BasicAlgorithm {
    /// Algorithm with the built-in conduction table
    pub fn new(step_time: f64) -> Self {
        Self {
            step_time,
            conduction: ConductionMap::new(),
        }
    }

    /// Algorithm with a custom conduction table, which must cover every material pair
    pub fn with_conduction(step_time: f64, conduction: ConductionMap) -> Result<Self, ConductionError> {
        conduction.validate()?;
        Ok(Self {
            step_time,
            conduction,
        })
    }

    #[inline]
    pub fn step_time(&self) -> f64 {
        self.step_time
    }
}

impl Algorithm for BasicAlgorithm {
    fn compute(&self, state: &State, index: IVec3) -> Result<Cell, IndexError> {
        let old = *state.cell(index)?;

        let heated = temperature::next_temperature(state, &old, index, self.step_time, &self.conduction);
        let burning_time = fire::next_burning_time(state, &old, index, heated);
        let flammable = fire::next_flammable(&old, burning_time);
        let temperature = fire::flame_temperature(state, &old, index, heated, burning_time, flammable);
        let remaining_fire_pillar = fire::next_fire_pillar(state, &old, index);

        let (smoke_indicator, oxygen_level) = if old.is_fluid() {
            (
                smoke::next_smoke(state, &old, index),
                oxygen::next_oxygen(state, &old, index, self.step_time),
            )
        } else {
            (0.0, 0.0)
        };

        Ok(Cell {
            temperature,
            burning_time,
            flammable,
            material: old.material,
            smoke_indicator,
            oxygen_level,
            remaining_fire_pillar,
        })
    }
}

/// The horizontal neighbours of `index` that burn and can pass flames sideways
///
/// A flame only spreads sideways when it cannot rise: the cell above it is
/// missing or not air.
pub(crate) fn burning_horizontal_neighbours(state: &State, index: IVec3) -> impl Iterator<Item = &Cell> + '_ {
    index
        .horizontal_neighbours()
        .into_iter()
        .filter_map(move |n| state.get(n).map(|cell| (n, cell)))
        .filter(move |(n, cell)| {
            cell.is_burning()
                && cell.remaining_fire_pillar > 0
                && !state.is_material(n.up(), firecell_model::Material::Air)
        })
        .map(|(_, cell)| cell)
}
