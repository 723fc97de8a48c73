//! Ignition, burnout and flame columns
//!
//! A flammable solid catches fire above its auto-ignition temperature, or
//! above its ignition temperature when a horizontal neighbour has been
//! burning long enough. It then burns for [`MAX_BURNING_TIME`] steps and is
//! spent.
//!
//! Air only burns as part of a flame column. A burning cell lights the air
//! above it with one less unit of `remaining_fire_pillar`; when the column
//! hits a ceiling it spreads sideways instead.

use firecell_math::IVec3;
use firecell_model::{Cell, State};

use super::{burning_horizontal_neighbours, MAX_BURNING_TIME, NEIGHBOUR_BURNING_TIME_TO_IGNITE};

/// Temperature of air lit by a flame spreading sideways
pub const HORIZONTAL_FLAME_TEMPERATURE: f64 = 600.0;

/// Burning time after this step
pub fn next_burning_time(state: &State, old: &Cell, index: IVec3, temperature: f64) -> i32 {
    if old.is_fluid() {
        air_burning_time(state, index)
    } else {
        solid_burning_time(state, old, index, temperature)
    }
}

/// Whether the cell can still burn after this step
pub fn next_flammable(old: &Cell, burning_time: i32) -> bool {
    if old.is_fluid() {
        old.flammable
    } else {
        old.flammable && burning_time < MAX_BURNING_TIME
    }
}

/// Temperature after flames are accounted for
///
/// A burning solid never drops below its burning temperature. Air in a
/// vertical column is held at the air burning temperature, air lit from the
/// side at [`HORIZONTAL_FLAME_TEMPERATURE`].
pub fn flame_temperature(
    state: &State,
    old: &Cell,
    index: IVec3,
    temperature: f64,
    burning_time: i32,
    flammable: bool,
) -> f64 {
    if burning_time <= 0 || !flammable {
        return temperature;
    }
    if old.is_solid() {
        return temperature.max(old.material.burning_temperature());
    }
    if lit_from_below(state, index) {
        temperature.max(old.material.burning_temperature())
    } else {
        temperature.max(HORIZONTAL_FLAME_TEMPERATURE)
    }
}

/// Remaining flame column height after this step
///
/// Solids keep theirs. Air takes one less than the burning cell below it or
/// one less than its strongest burning horizontal neighbour, when that
/// neighbour's column is higher than its own.
pub fn next_fire_pillar(state: &State, old: &Cell, index: IVec3) -> i32 {
    if old.is_solid() {
        return old.remaining_fire_pillar;
    }

    let from_below = state
        .get(index.down())
        .filter(|below| below.is_burning() && below.remaining_fire_pillar > 1)
        .map_or(0, |below| below.remaining_fire_pillar - 1);

    let strongest = burning_horizontal_neighbours(state, index)
        .map(|n| n.remaining_fire_pillar)
        .filter(|&p| p > 1)
        .max()
        .unwrap_or(0);
    let from_side = if strongest > old.remaining_fire_pillar {
        strongest - 1
    } else {
        0
    };

    from_below.max(from_side)
}

fn solid_burning_time(state: &State, old: &Cell, index: IVec3, temperature: f64) -> i32 {
    let mut burning_time = old.burning_time;
    let material = old.material;

    if old.burning_time == 0 && old.flammable {
        let auto = temperature > material.auto_ignition_temperature();
        let from_neighbour = temperature > material.ignition_temperature()
            && neighbour_can_ignite(state, index);
        if auto || from_neighbour {
            burning_time += 1;
        }
    }

    if old.burning_time > 0 && old.burning_time <= MAX_BURNING_TIME {
        burning_time += 1;
    }

    burning_time
}

fn neighbour_can_ignite(state: &State, index: IVec3) -> bool {
    index
        .horizontal_neighbours()
        .into_iter()
        .filter_map(|n| state.get(n))
        .any(|n| n.burning_time > NEIGHBOUR_BURNING_TIME_TO_IGNITE)
}

/// Air burns for exactly one step unless a flame keeps feeding it
fn air_burning_time(state: &State, index: IVec3) -> i32 {
    if lit_from_below(state, index) {
        return 1;
    }
    let lit_from_side = burning_horizontal_neighbours(state, index).any(|n| n.remaining_fire_pillar > 1);
    i32::from(lit_from_side)
}

fn lit_from_below(state: &State, index: IVec3) -> bool {
    state
        .get(index.down())
        .is_some_and(|below| below.is_burning() && below.remaining_fire_pillar > 1)
}
