//! Oxygen diffusion and consumption

use firecell_math::IVec3;
use firecell_model::{Cell, State};

use super::OXYGEN_USAGE_IN_FIRE;

/// Weight of each of the six neighbours in the diffusion average
const NEIGHBOUR_WEIGHT: f64 = 1.0;
/// Weight of the cell itself in the diffusion average
const SELF_WEIGHT: f64 = 1.0;

/// Oxygen level of a fluid cell after this step
///
/// The level relaxes toward the weighted average of the cell and its six
/// neighbours; solid or missing neighbours count as the cell's own level.
/// Burning air then consumes oxygen, never going below zero.
pub fn next_oxygen(state: &State, old: &Cell, index: IVec3, step_time: f64) -> f64 {
    let current = old.oxygen_level;
    let total_weight = 6.0 * NEIGHBOUR_WEIGHT + SELF_WEIGHT;

    let neighbours: f64 = index
        .neighbours()
        .into_iter()
        .map(|n| match state.get(n) {
            Some(cell) if cell.is_fluid() => cell.oxygen_level,
            _ => current,
        })
        .sum();
    let average = neighbours * NEIGHBOUR_WEIGHT / total_weight + current * SELF_WEIGHT / total_weight;

    let diffused = current - step_time * (current - average);

    if old.is_burning() && diffused > 0.0 {
        (diffused - step_time * OXYGEN_USAGE_IN_FIRE).max(0.0)
    } else {
        diffused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firecell_model::{Material, FULL_OXYGEN};

    const STEP: f64 = 0.5;

    #[test]
    fn test_uniform_air_is_stable() {
        let state = State::empty(IVec3::splat(3)).unwrap();
        let old = *state.cell(IVec3::ONE).unwrap();
        assert!((next_oxygen(&state, &old, IVec3::ONE, STEP) - FULL_OXYGEN).abs() < 1e-9);
    }

    #[test]
    fn test_depleted_cell_refills_from_neighbours() {
        let mut state = State::empty(IVec3::splat(3)).unwrap();
        state.cell_mut(IVec3::ONE).unwrap().oxygen_level = 30.0;
        let old = *state.cell(IVec3::ONE).unwrap();
        // average = (600 + 30) / 7 = 90; 30 - 0.5 * (30 - 90) = 60
        assert!((next_oxygen(&state, &old, IVec3::ONE, STEP) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_walls_do_not_leak_oxygen() {
        let mut state = State::filled(IVec3::splat(3), Cell::ambient(Material::Wood)).unwrap();
        *state.cell_mut(IVec3::ONE).unwrap() = Cell::air().with_oxygen(70.0);
        let old = *state.cell(IVec3::ONE).unwrap();
        assert!((next_oxygen(&state, &old, IVec3::ONE, STEP) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_fire_consumes_oxygen() {
        let state = State::filled(IVec3::ONE, Cell::air().with_burning_time(1)).unwrap();
        let old = *state.cell(IVec3::ZERO).unwrap();
        let expected = FULL_OXYGEN - STEP * OXYGEN_USAGE_IN_FIRE;
        assert!((next_oxygen(&state, &old, IVec3::ZERO, STEP) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_oxygen_never_negative() {
        let state = State::filled(IVec3::ONE, Cell::air().with_burning_time(1).with_oxygen(1.0)).unwrap();
        let old = *state.cell(IVec3::ZERO).unwrap();
        assert_eq!(next_oxygen(&state, &old, IVec3::ZERO, STEP), 0.0);
    }
}
