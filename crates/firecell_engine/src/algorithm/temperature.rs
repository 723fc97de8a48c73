//! Heat transfer
//!
//! Solids exchange heat with every face neighbour through the conduction
//! table. Air additionally moves heat by convection: warmer air below heats
//! the cell, colder air above cools it. When the cell above is missing or
//! already hot the rising gas is blocked and spreads sideways instead.

use firecell_math::IVec3;
use firecell_model::{Cell, ConductionMap, Material, State};

use super::{CEILING_HEAT_THRESHOLD, CONVECTION_COEFFICIENT};

/// Temperature of `old` after one step, before any fire effects
pub fn next_temperature(
    state: &State,
    old: &Cell,
    index: IVec3,
    step_time: f64,
    conduction: &ConductionMap,
) -> f64 {
    let delta = if old.is_solid() {
        conduction_delta(state, old, index, conduction)
    } else {
        convection_delta(state, old, index) + solid_contact_delta(state, old, index, conduction)
    };
    old.temperature + step_time * delta
}

/// Heat flow into a solid from all six neighbours
fn conduction_delta(state: &State, old: &Cell, index: IVec3, conduction: &ConductionMap) -> f64 {
    index
        .neighbours()
        .into_iter()
        .filter_map(|n| state.get(n))
        .map(|n| exchange(old, n, conduction))
        .sum()
}

/// Heat flow into a fluid from its solid neighbours
fn solid_contact_delta(state: &State, old: &Cell, index: IVec3, conduction: &ConductionMap) -> f64 {
    index
        .neighbours()
        .into_iter()
        .filter_map(|n| state.get(n))
        .filter(|n| n.is_solid())
        .map(|n| exchange(old, n, conduction))
        .sum()
}

fn exchange(cell: &Cell, neighbour: &Cell, conduction: &ConductionMap) -> f64 {
    let k = conduction
        .coefficient(cell.material, neighbour.material)
        .unwrap_or(0.0);
    k * (neighbour.temperature - cell.temperature)
}

fn convection_delta(state: &State, old: &Cell, index: IVec3) -> f64 {
    let mut delta = 0.0;

    if let Some(below) = air_at(state, index.down()) {
        if below.temperature > old.temperature {
            delta += CONVECTION_COEFFICIENT * (below.temperature - old.temperature);
        }
    }

    let above = state.get(index.up());
    if let Some(above) = above.filter(|c| c.material == Material::Air) {
        if above.temperature < old.temperature {
            delta -= CONVECTION_COEFFICIENT * (old.temperature - above.temperature);
        }
    }

    let blocked = above.map_or(true, |c| c.temperature > CEILING_HEAT_THRESHOLD);
    if blocked {
        delta += ceiling_spread_delta(state, old, index);
    }

    delta
}

/// Sideways spread of heat trapped under a ceiling
///
/// The difference to each colder neighbour is shared among the colder ones
/// and likewise for warmer neighbours. Neighbours at the same temperature
/// count as colder.
fn ceiling_spread_delta(state: &State, old: &Cell, index: IVec3) -> f64 {
    let mut hotter = 0u32;
    let mut colder = 0u32;
    let mut gained = 0.0;
    let mut lost = 0.0;

    for neighbour in index
        .horizontal_neighbours()
        .into_iter()
        .filter_map(|n| state.get(n))
        .filter(|n| n.is_fluid())
    {
        if neighbour.temperature > old.temperature {
            hotter += 1;
            gained += neighbour.temperature - old.temperature;
        } else {
            colder += 1;
            lost += old.temperature - neighbour.temperature;
        }
    }

    let mut delta = 0.0;
    if hotter > 0 {
        delta += gained / hotter as f64;
    }
    if colder > 0 {
        delta -= lost / colder as f64;
    }
    delta
}

fn air_at(state: &State, index: IVec3) -> Option<&Cell> {
    state.get(index).filter(|c| c.material == Material::Air)
}
