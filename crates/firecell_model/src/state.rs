//! Room state at one simulation step

use firecell_math::IVec3;

use crate::index::{self, IndexError};
use crate::{Cell, Material};

/// Error building a state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Space size has a non-positive component
    InvalidSpaceSize(IVec3),
    /// Number of cells does not equal the space volume
    CellCountMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::InvalidSpaceSize(size) => write!(f, "Invalid space size {}", size),
            StateError::CellCountMismatch { expected, actual } => {
                write!(f, "Expected {} cells, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for StateError {}

/// All cells of the room plus its size
///
/// Invariant: `cells.len() == space_size.volume()`.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    cells: Vec<Cell>,
    space_size: IVec3,
}

impl State {
    /// Build a state, checking the cell count against the space size
    pub fn new(cells: Vec<Cell>, space_size: IVec3) -> Result<Self, StateError> {
        if space_size.x <= 0 || space_size.y <= 0 || space_size.z <= 0 {
            return Err(StateError::InvalidSpaceSize(space_size));
        }
        let expected = space_size.volume() as usize;
        if cells.len() != expected {
            return Err(StateError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { cells, space_size })
    }

    /// A room filled with the given cell
    pub fn filled(space_size: IVec3, cell: Cell) -> Result<Self, StateError> {
        let count = space_size.volume().max(0) as usize;
        Self::new(vec![cell; count], space_size)
    }

    /// A room full of air at room temperature
    pub fn empty(space_size: IVec3) -> Result<Self, StateError> {
        Self::filled(space_size, Cell::air())
    }

    #[inline]
    pub fn space_size(&self) -> IVec3 {
        self.space_size
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to the cells; the count cannot change
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn has_cell(&self, index: IVec3) -> bool {
        index::is_in_space(index, self.space_size)
    }

    /// Cell at `index`, or `None` outside the room
    #[inline]
    pub fn get(&self, index: IVec3) -> Option<&Cell> {
        index::flatten_index(index, self.space_size)
            .ok()
            .map(|flat| &self.cells[flat])
    }

    /// Cell at `index`
    pub fn cell(&self, index: IVec3) -> Result<&Cell, IndexError> {
        let flat = index::flatten_index(index, self.space_size)?;
        Ok(&self.cells[flat])
    }

    pub fn cell_mut(&mut self, index: IVec3) -> Result<&mut Cell, IndexError> {
        let flat = index::flatten_index(index, self.space_size)?;
        Ok(&mut self.cells[flat])
    }

    /// Whether the cell at `index` exists and is made of `material`
    #[inline]
    pub fn is_material(&self, index: IVec3, material: Material) -> bool {
        self.get(index).is_some_and(|c| c.material == material)
    }

    /// Iterate over `(index, cell)` pairs in storage order
    pub fn indexed_cells(&self) -> impl Iterator<Item = (IVec3, &Cell)> + '_ {
        let sx = self.space_size.x;
        let sy = self.space_size.y;
        self.cells.iter().enumerate().map(move |(flat, cell)| {
            let flat = flat as i32;
            let index = IVec3::new(flat % sx, flat / sx % sy, flat / (sx * sy));
            (index, cell)
        })
    }
}
