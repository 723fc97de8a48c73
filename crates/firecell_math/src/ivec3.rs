//! Integer grid index

use serde::{Deserialize, Serialize};

/// Grid axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Integer 3D vector, used as a cell index and as a grid size
///
/// The Y axis points up, matching the renderer. X runs east/west and
/// Z runs north/south.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };
    pub const ONE: Self = Self { x: 1, y: 1, z: 1 };

    /// Create a new IVec3
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same value on all three components
    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Product of the components (cell count for a grid size)
    #[inline]
    pub fn volume(self) -> i64 {
        self.x as i64 * self.y as i64 * self.z as i64
    }

    #[inline]
    pub fn up(self) -> Self {
        Self::new(self.x, self.y + 1, self.z)
    }

    #[inline]
    pub fn down(self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }

    #[inline]
    pub fn east(self) -> Self {
        Self::new(self.x + 1, self.y, self.z)
    }

    #[inline]
    pub fn west(self) -> Self {
        Self::new(self.x - 1, self.y, self.z)
    }

    #[inline]
    pub fn north(self) -> Self {
        Self::new(self.x, self.y, self.z + 1)
    }

    #[inline]
    pub fn south(self) -> Self {
        Self::new(self.x, self.y, self.z - 1)
    }

    /// All six face neighbours: up, down, east, west, north, south
    pub fn neighbours(self) -> [Self; 6] {
        [
            self.up(),
            self.down(),
            self.east(),
            self.west(),
            self.north(),
            self.south(),
        ]
    }

    /// The two face neighbours along one axis
    pub fn axis_neighbours(self, axis: Axis) -> [Self; 2] {
        match axis {
            Axis::X => [self.east(), self.west()],
            Axis::Y => [self.up(), self.down()],
            Axis::Z => [self.north(), self.south()],
        }
    }

    /// The four neighbours in the horizontal plane (X axis, then Z axis)
    pub fn horizontal_neighbours(self) -> [Self; 4] {
        [self.east(), self.west(), self.north(), self.south()]
    }
}

impl std::ops::Add for IVec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for IVec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::fmt::Display for IVec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for IVec3 {
    fn from(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}
