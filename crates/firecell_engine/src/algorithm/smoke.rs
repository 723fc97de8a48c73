//! Smoke production and flow
//!
//! Burning solids push smoke into the air above and beside them. Smoke
//! rises into the air cell above as far as it has capacity and only spreads
//! sideways where the cell above cannot take it.

use firecell_math::IVec3;
use firecell_model::{Cell, State, MAX_SMOKE};

/// Below this level smoke is treated as gone
pub const SMOKE_EPSILON: f64 = 0.0005;
/// Air at or above this level no longer accepts smoke from below
pub const SMOKE_RISE_LIMIT: f64 = 50.0;

/// Smoke indicator of a fluid cell after this step
pub fn next_smoke(state: &State, old: &Cell, index: IVec3) -> f64 {
    let produced = smoke_from_fire(state, index) as f64;
    let value = (old.smoke_indicator + smoke_flow(state, old, index) + produced).min(MAX_SMOKE);
    if value < SMOKE_EPSILON {
        0.0
    } else {
        value
    }
}

/// Smoke emitted into this cell by burning solids below and beside it
fn smoke_from_fire(state: &State, index: IVec3) -> i32 {
    let mut produced = state
        .get(index.down())
        .filter(|c| c.is_burning() && c.is_solid())
        .map_or(0, |c| c.material.smoke_coefficient());

    for neighbour in index
        .horizontal_neighbours()
        .into_iter()
        .filter_map(|n| state.get(n))
        .filter(|c| c.is_burning() && c.is_solid())
    {
        produced += neighbour.material.smoke_coefficient() / 4;
    }
    produced
}

/// Net smoke exchanged with neighbouring fluid cells
fn smoke_flow(state: &State, old: &Cell, index: IVec3) -> f64 {
    let mut current = old.smoke_indicator;
    let mut flow = 0.0;

    for neighbour_index in index.neighbours() {
        let Some(neighbour) = state.get(neighbour_index).filter(|c| c.is_fluid()) else {
            continue;
        };

        if neighbour_index == index.up() {
            let rising = -old.smoke_indicator.min(MAX_SMOKE - neighbour.smoke_indicator);
            current += rising;
            flow += rising;
        } else if neighbour_index == index.down() {
            let arriving = neighbour.smoke_indicator.min(MAX_SMOKE - old.smoke_indicator);
            current += arriving;
            flow += arriving;
        } else {
            let own_share = (open_horizontal_neighbours(state, index) + 1) as f64;
            let their_share = (open_horizontal_neighbours(state, neighbour_index) + 1) as f64;

            if cannot_rise(state, index) {
                flow -= ((MAX_SMOKE - neighbour.smoke_indicator) / their_share).min(current / own_share);
            }
            if cannot_rise(state, neighbour_index) {
                flow += ((MAX_SMOKE - current) / own_share).min(neighbour.smoke_indicator / their_share);
            }
        }
    }

    flow
}

/// Horizontal neighbours that still have room for smoke
fn open_horizontal_neighbours(state: &State, index: IVec3) -> usize {
    index
        .horizontal_neighbours()
        .into_iter()
        .filter_map(|n| state.get(n))
        .filter(|c| c.smoke_indicator < MAX_SMOKE)
        .count()
}

/// Whether smoke in `index` is stuck below a ceiling, a solid or dense smoke
fn cannot_rise(state: &State, index: IVec3) -> bool {
    match state.get(index.up()) {
        None => true,
        Some(above) => !above.is_fluid() || above.smoke_indicator >= SMOKE_RISE_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firecell_model::Material;

    #[test]
    fn test_smoke_rises() {
        let cells = vec![Cell::air().with_smoke(40.0), Cell::air()];
        let state = State::new(cells, IVec3::new(1, 2, 1)).unwrap();

        let bottom = *state.cell(IVec3::ZERO).unwrap();
        assert_eq!(next_smoke(&state, &bottom, IVec3::ZERO), 0.0);

        let top = IVec3::new(0, 1, 0);
        let old = *state.cell(top).unwrap();
        assert_eq!(next_smoke(&state, &old, top), 40.0);
    }

    #[test]
    fn test_rising_limited_by_capacity_above() {
        let cells = vec![Cell::air().with_smoke(40.0), Cell::air().with_smoke(90.0)];
        let state = State::new(cells, IVec3::new(1, 2, 1)).unwrap();
        let bottom = *state.cell(IVec3::ZERO).unwrap();
        assert!((next_smoke(&state, &bottom, IVec3::ZERO) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_smoke_spreads_under_ceiling() {
        let cells = vec![Cell::air().with_smoke(60.0), Cell::air()];
        let state = State::new(cells, IVec3::new(2, 1, 1)).unwrap();

        // Each side has one open neighbour, so shares are halved
        let source = *state.cell(IVec3::ZERO).unwrap();
        assert!((next_smoke(&state, &source, IVec3::ZERO) - 30.0).abs() < 1e-9);

        let sink = IVec3::new(1, 0, 0);
        let old = *state.cell(sink).unwrap();
        assert!((next_smoke(&state, &old, sink) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_burning_wood_produces_smoke() {
        let mut state = State::empty(IVec3::new(2, 2, 1)).unwrap();
        *state.cell_mut(IVec3::ZERO).unwrap() = Cell::ambient(Material::Wood).with_burning_time(3);

        // Directly above: full coefficient, minus nothing since the air above is clean
        let above = IVec3::new(0, 1, 0);
        let old = *state.cell(above).unwrap();
        assert_eq!(next_smoke(&state, &old, above), 20.0);

        // Beside: a quarter of the coefficient
        let beside = IVec3::new(1, 0, 0);
        let old = *state.cell(beside).unwrap();
        assert_eq!(next_smoke(&state, &old, beside), 5.0);
    }

    #[test]
    fn test_smoke_is_capped() {
        let mut state = State::filled(IVec3::new(1, 2, 1), Cell::air().with_smoke(MAX_SMOKE)).unwrap();
        *state.cell_mut(IVec3::ZERO).unwrap() = Cell::ambient(Material::Wood).with_burning_time(3);
        let top = IVec3::new(0, 1, 0);
        let old = *state.cell(top).unwrap();
        assert_eq!(next_smoke(&state, &old, top), MAX_SMOKE);
    }

    #[test]
    fn test_traces_snap_to_zero() {
        let state = State::filled(IVec3::ONE, Cell::air().with_smoke(0.0001)).unwrap();
        let old = *state.cell(IVec3::ZERO).unwrap();
        assert_eq!(next_smoke(&state, &old, IVec3::ZERO), 0.0);
    }
}
