//! Conversion between grid indices and flat cell positions
//!
//! Cells are stored X-fastest, then Y, then Z:
//! `flat = x + y * sx + z * sx * sy`.

use firecell_math::IVec3;

/// Index outside the simulation space
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A component is negative
    Negative(IVec3),
    /// Index lies beyond the space size
    OutOfSpace { index: IVec3, space_size: IVec3 },
    /// Flat index is negative or not below the cell count
    FlatOutOfRange { index: i64, space_size: IVec3 },
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::Negative(index) => write!(f, "Index {} has negative components", index),
            IndexError::OutOfSpace { index, space_size } => {
                write!(f, "Index {} out of space {}", index, space_size)
            }
            IndexError::FlatOutOfRange { index, space_size } => {
                write!(f, "Flat index {} out of space {}", index, space_size)
            }
        }
    }
}

impl std::error::Error for IndexError {}

/// Whether `index` lies inside a grid of `space_size`
#[inline]
pub fn is_in_space(index: IVec3, space_size: IVec3) -> bool {
    0 <= index.x
        && index.x < space_size.x
        && 0 <= index.y
        && index.y < space_size.y
        && 0 <= index.z
        && index.z < space_size.z
}

/// Flat position of `index` in a grid of `space_size`
pub fn flatten_index(index: IVec3, space_size: IVec3) -> Result<usize, IndexError> {
    if index.x < 0 || index.y < 0 || index.z < 0 {
        return Err(IndexError::Negative(index));
    }
    if !is_in_space(index, space_size) {
        return Err(IndexError::OutOfSpace { index, space_size });
    }
    let sx = space_size.x as usize;
    let sy = space_size.y as usize;
    Ok(index.x as usize + index.y as usize * sx + index.z as usize * sx * sy)
}

/// Grid index of flat position `flat` in a grid of `space_size`
pub fn expand_index(flat: i64, space_size: IVec3) -> Result<IVec3, IndexError> {
    if flat < 0 || flat >= space_size.volume() {
        return Err(IndexError::FlatOutOfRange {
            index: flat,
            space_size,
        });
    }
    let sx = space_size.x as i64;
    let sxy = sx * space_size.y as i64;
    let z = flat / sxy;
    let y = flat % sxy / sx;
    let x = flat - y * sx - z * sxy;
    Ok(IVec3::new(x as i32, y as i32, z as i32))
}

/// Every index in the box `[start, end]`, both ends inclusive
///
/// Iterates X outermost, Z innermost. Empty when `end` is below `start` on
/// any axis.
pub fn range(start: IVec3, end: IVec3) -> impl Iterator<Item = IVec3> {
    (start.x..=end.x).flat_map(move |x| {
        (start.y..=end.y).flat_map(move |y| (start.z..=end.z).map(move |z| IVec3::new(x, y, z)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn vec(x: i32, y: i32, z: i32) -> IVec3 {
        IVec3::new(x, y, z)
    }

    #[test]
    fn test_flatten_index() {
        let space = vec(3, 3, 3);
        assert_eq!(flatten_index(vec(0, 0, 0), space), Ok(0));
        assert_eq!(flatten_index(vec(0, 0, 1), space), Ok(9));
        assert_eq!(flatten_index(vec(0, 1, 2), space), Ok(21));
    }

    #[test]
    fn test_expand_index() {
        let space = vec(3, 3, 3);
        assert_eq!(expand_index(0, space), Ok(vec(0, 0, 0)));
        assert_eq!(expand_index(9, space), Ok(vec(0, 0, 1)));
        assert_eq!(expand_index(21, space), Ok(vec(0, 1, 2)));
    }

    #[test]
    fn test_expand_inverts_flatten_on_uneven_space() {
        let space = vec(4, 2, 3);
        for flat in 0..space.volume() {
            let expanded = expand_index(flat, space).unwrap();
            assert_eq!(flatten_index(expanded, space).unwrap() as i64, flat);
        }
    }

    #[test]
    fn test_negative_index_rejected() {
        let space = vec(3, 3, 3);
        assert_eq!(flatten_index(vec(-1, 0, 0), space), Err(IndexError::Negative(vec(-1, 0, 0))));
        assert!(expand_index(-1, space).is_err());
    }

    #[test]
    fn test_out_of_space_rejected() {
        let space = vec(3, 3, 3);
        // Would alias to a valid flat index without the per-axis check
        assert!(flatten_index(vec(3, 0, 0), space).is_err());
        assert!(flatten_index(vec(0, 0, 3), space).is_err());
        assert!(expand_index(27, space).is_err());
    }

    #[test]
    fn test_range_is_inclusive_box() {
        let actual: HashSet<IVec3> = range(vec(0, 0, 0), vec(2, 2, 2)).collect();
        let mut expected = HashSet::new();
        for x in 0..=2 {
            for y in 0..=2 {
                for z in 0..=2 {
                    expected.insert(vec(x, y, z));
                }
            }
        }
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(range(vec(1, 1, 1), vec(0, 5, 5)).count(), 0);
    }
}
