//! Serializable room building blocks
//!
//! Elements are applied in order on top of a room full of air, so later
//! elements overwrite earlier ones. Cells falling outside the room are
//! skipped.

use firecell_math::IVec3;
use firecell_model::{index, Cell, Material, State};
use serde::{Deserialize, Serialize};

/// One building block of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    /// Box of a single material
    Cuboid {
        /// Lowest corner
        position: IVec3,
        size: IVec3,
        material: Material,
    },
    /// One-cell-thick wooden floor at `y = 0`
    Floor {
        /// Corner on the X/Z plane
        position: [i32; 2],
        /// Extent on the X/Z plane
        size: [i32; 2],
    },
    /// Wooden floor plus four wooden walls
    Room {
        /// Corner on the X/Z plane
        position: [i32; 2],
        size: IVec3,
    },
    /// Sets every flammable cell in the box on fire
    Ignition { position: IVec3, size: IVec3 },
}

impl Element {
    pub fn cuboid(position: IVec3, size: IVec3, material: Material) -> Self {
        Element::Cuboid {
            position,
            size,
            material,
        }
    }

    pub fn floor(position: [i32; 2], size: [i32; 2]) -> Self {
        Element::Floor { position, size }
    }

    pub fn room(position: [i32; 2], size: IVec3) -> Self {
        Element::Room { position, size }
    }

    pub fn ignition(position: IVec3, size: IVec3) -> Self {
        Element::Ignition { position, size }
    }

    /// Short lowercase name of the element kind
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Cuboid { .. } => "cuboid",
            Element::Floor { .. } => "floor",
            Element::Room { .. } => "room",
            Element::Ignition { .. } => "ignition",
        }
    }

    /// Lowest corner and size of the box the element covers
    pub fn bounds(&self) -> (IVec3, IVec3) {
        match self {
            Element::Cuboid { position, size, .. } | Element::Ignition { position, size } => {
                (*position, *size)
            }
            Element::Floor { position, size } => (
                IVec3::new(position[0], 0, position[1]),
                IVec3::new(size[0], 1, size[1]),
            ),
            Element::Room { position, size } => (IVec3::new(position[0], 0, position[1]), *size),
        }
    }

    /// Write this element into `state`
    pub fn apply(&self, state: &mut State) {
        let space = state.space_size();
        match self {
            Element::Cuboid {
                position,
                size,
                material,
            } => {
                for index in box_indices(*position, *size, space) {
                    if let Ok(cell) = state.cell_mut(index) {
                        *cell = Cell::ambient(*material);
                    }
                }
            }
            Element::Ignition { position, size } => {
                for index in box_indices(*position, *size, space) {
                    if let Ok(cell) = state.cell_mut(index) {
                        if cell.flammable {
                            cell.temperature = cell.material.burning_temperature();
                            cell.burning_time = 1;
                        }
                    }
                }
            }
            Element::Floor { .. } | Element::Room { .. } => {
                for child in self.children() {
                    child.apply(state);
                }
            }
        }
    }

    /// Simple elements a composite element is made of; empty for simple ones
    pub fn children(&self) -> Vec<Element> {
        match self {
            Element::Floor { position, size } => vec![Element::cuboid(
                IVec3::new(position[0], 0, position[1]),
                IVec3::new(size[0], 1, size[1]),
                Material::Wood,
            )],
            Element::Room { position, size } => {
                let [x, z] = *position;
                vec![
                    Element::floor(*position, [size.x, size.z]),
                    Element::cuboid(IVec3::new(x, 0, z), IVec3::new(size.x, size.y, 1), Material::Wood),
                    Element::cuboid(IVec3::new(x, 0, z), IVec3::new(1, size.y, size.z), Material::Wood),
                    Element::cuboid(
                        IVec3::new(last(x, size.x), 0, z),
                        IVec3::new(1, size.y, size.z),
                        Material::Wood,
                    ),
                    Element::cuboid(
                        IVec3::new(x, 0, last(z, size.z)),
                        IVec3::new(size.x, size.y, 1),
                        Material::Wood,
                    ),
                ]
            }
            Element::Cuboid { .. } | Element::Ignition { .. } => Vec::new(),
        }
    }
}

/// Last cell of a run of `size` cells starting at `start`, saturating
fn last(start: i32, size: i32) -> i32 {
    start.saturating_add(size.saturating_sub(1))
}

/// Cells of the box at `position` of `size` that lie inside `[0, space)`
fn box_indices(position: IVec3, size: IVec3, space: IVec3) -> impl Iterator<Item = IVec3> {
    let clip = |start: i32, size: i32, space: i32| {
        let end = (start as i64 + size as i64 - 1).min(space as i64 - 1).max(-1);
        (start.max(0), end as i32)
    };
    let (x0, x1) = clip(position.x, size.x, space.x);
    let (y0, y1) = clip(position.y, size.y, space.y);
    let (z0, z1) = clip(position.z, size.z, space.z);
    index::range(IVec3::new(x0, y0, z0), IVec3::new(x1, y1, z1))
}
