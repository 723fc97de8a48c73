//! Binary state format
//!
//! Layout, all little-endian:
//!
//! ```text
//! magic       4 bytes  "FCST"
//! version     u16      1
//! space size  3 x i32  x, y, z
//! cell count  u32
//! cells       count x 34 bytes
//!     temperature            f64
//!     burning_time           i32
//!     flammable              u8 (0 or 1)
//!     material id            u8
//!     smoke_indicator        f64
//!     oxygen_level           f64
//!     remaining_fire_pillar  i32
//! crc32       u32      over everything before it
//! ```

use std::io::{self, Cursor};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use firecell_math::IVec3;
use firecell_model::{Cell, Material, State, StateError};

pub const MAGIC: &[u8; 4] = b"FCST";
pub const FORMAT_VERSION: u16 = 1;

const HEADER_SIZE: usize = 4 + 2 + 3 * 4 + 4;
const CELL_SIZE: usize = 8 + 4 + 1 + 1 + 8 + 8 + 4;
const TRAILER_SIZE: usize = 4;

/// Error encoding or decoding a state
#[derive(Debug)]
pub enum SerializationError {
    /// Data ends before the declared content
    Truncated,
    /// First four bytes are not the format magic
    BadMagic([u8; 4]),
    /// Written by an unknown format version
    UnsupportedVersion(u16),
    /// Material id not known to this build
    UnknownMaterial(u8),
    /// Cell count does not match the space size or the data length
    CountMismatch { expected: usize, actual: usize },
    /// Stored checksum differs from the computed one
    ChecksumMismatch { stored: u32, computed: u32 },
    /// Decoded cells do not form a valid state
    InvalidState(StateError),
    Io(io::Error),
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationError::Truncated => write!(f, "State data is truncated"),
            SerializationError::BadMagic(magic) => write!(f, "Bad magic bytes {:?}", magic),
            SerializationError::UnsupportedVersion(v) => {
                write!(f, "Unsupported format version {}", v)
            }
            SerializationError::UnknownMaterial(id) => write!(f, "Unknown material id {}", id),
            SerializationError::CountMismatch { expected, actual } => {
                write!(f, "Expected {} cells, found {}", expected, actual)
            }
            SerializationError::ChecksumMismatch { stored, computed } => write!(
                f,
                "Checksum mismatch: stored {:08x}, computed {:08x}",
                stored, computed
            ),
            SerializationError::InvalidState(e) => write!(f, "Invalid state: {}", e),
            SerializationError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for SerializationError {}

impl From<io::Error> for SerializationError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            SerializationError::Truncated
        } else {
            SerializationError::Io(e)
        }
    }
}

impl From<StateError> for SerializationError {
    fn from(e: StateError) -> Self {
        SerializationError::InvalidState(e)
    }
}

/// Converts states to and from bytes
pub trait StateSerializer: Send + Sync {
    fn serialize(&self, state: &State) -> Result<Vec<u8>, SerializationError>;
    fn deserialize(&self, bytes: &[u8]) -> Result<State, SerializationError>;
}

/// The `FCST` format described in the module docs
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryStateSerializer;

impl StateSerializer for BinaryStateSerializer {
    fn serialize(&self, state: &State) -> Result<Vec<u8>, SerializationError> {
        let size = state.space_size();
        let mut out = Vec::with_capacity(HEADER_SIZE + state.len() * CELL_SIZE + TRAILER_SIZE);

        out.extend_from_slice(MAGIC);
        out.write_u16::<LittleEndian>(FORMAT_VERSION)?;
        out.write_i32::<LittleEndian>(size.x)?;
        out.write_i32::<LittleEndian>(size.y)?;
        out.write_i32::<LittleEndian>(size.z)?;
        out.write_u32::<LittleEndian>(state.len() as u32)?;

        for cell in state.cells() {
            out.write_f64::<LittleEndian>(cell.temperature)?;
            out.write_i32::<LittleEndian>(cell.burning_time)?;
            out.write_u8(u8::from(cell.flammable))?;
            out.write_u8(cell.material.id())?;
            out.write_f64::<LittleEndian>(cell.smoke_indicator)?;
            out.write_f64::<LittleEndian>(cell.oxygen_level)?;
            out.write_i32::<LittleEndian>(cell.remaining_fire_pillar)?;
        }

        let checksum = crc32fast::hash(&out);
        out.write_u32::<LittleEndian>(checksum)?;
        Ok(out)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<State, SerializationError> {
        if bytes.len() < MAGIC.len() {
            return Err(SerializationError::Truncated);
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        if &magic != MAGIC {
            return Err(SerializationError::BadMagic(magic));
        }
        if bytes.len() < HEADER_SIZE + TRAILER_SIZE {
            return Err(SerializationError::Truncated);
        }

        let (body, trailer) = bytes.split_at(bytes.len() - TRAILER_SIZE);
        let stored = Cursor::new(trailer).read_u32::<LittleEndian>()?;
        let computed = crc32fast::hash(body);
        if stored != computed {
            return Err(SerializationError::ChecksumMismatch { stored, computed });
        }

        let mut reader = Cursor::new(&body[4..]);
        let version = reader.read_u16::<LittleEndian>()?;
        if version != FORMAT_VERSION {
            return Err(SerializationError::UnsupportedVersion(version));
        }

        let size = IVec3::new(
            reader.read_i32::<LittleEndian>()?,
            reader.read_i32::<LittleEndian>()?,
            reader.read_i32::<LittleEndian>()?,
        );
        let count = reader.read_u32::<LittleEndian>()? as usize;
        let expected = size.volume().max(0) as usize;
        if count != expected {
            return Err(SerializationError::CountMismatch {
                expected,
                actual: count,
            });
        }

        let available = (body.len() - HEADER_SIZE) / CELL_SIZE;
        if (body.len() - HEADER_SIZE) % CELL_SIZE != 0 || available != count {
            return Err(SerializationError::CountMismatch {
                expected: count,
                actual: available,
            });
        }

        let mut cells = Vec::with_capacity(count);
        for _ in 0..count {
            let temperature = reader.read_f64::<LittleEndian>()?;
            let burning_time = reader.read_i32::<LittleEndian>()?;
            let flammable = reader.read_u8()? != 0;
            let material_id = reader.read_u8()?;
            let material =
                Material::from_id(material_id).ok_or(SerializationError::UnknownMaterial(material_id))?;
            cells.push(Cell {
                temperature,
                burning_time,
                flammable,
                material,
                smoke_indicator: reader.read_f64::<LittleEndian>()?,
                oxygen_level: reader.read_f64::<LittleEndian>()?,
                remaining_fire_pillar: reader.read_i32::<LittleEndian>()?,
            });
        }

        Ok(State::new(cells, size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> State {
        let mut state = State::empty(IVec3::new(3, 2, 2)).unwrap();
        *state.cell_mut(IVec3::new(1, 0, 1)).unwrap() = Cell::new(Material::Wood, 612.5)
            .with_burning_time(14)
            .with_fire_pillar(5);
        *state.cell_mut(IVec3::new(2, 1, 0)).unwrap() = Cell::air()
            .with_smoke(33.25)
            .with_oxygen(71.0)
            .with_burning_time(1);
        *state.cell_mut(IVec3::new(0, 1, 1)).unwrap() = Cell::ambient(Material::CellularConcrete);
        state
    }

    /// Recompute the trailer after tampering with the body
    fn reseal(bytes: &mut Vec<u8>) {
        let body_len = bytes.len() - TRAILER_SIZE;
        let checksum = crc32fast::hash(&bytes[..body_len]);
        bytes.truncate(body_len);
        bytes.write_u32::<LittleEndian>(checksum).unwrap();
    }

    #[test]
    fn test_round_trip() {
        let state = sample_state();
        let bytes = BinaryStateSerializer.serialize(&state).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 12 * CELL_SIZE + TRAILER_SIZE);
        assert_eq!(&bytes[..4], MAGIC);
        assert_eq!(BinaryStateSerializer.deserialize(&bytes).unwrap(), state);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = BinaryStateSerializer.serialize(&sample_state()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(
            BinaryStateSerializer.deserialize(&bytes),
            Err(SerializationError::BadMagic(_))
        ));
    }

    #[test]
    fn test_truncated() {
        let bytes = BinaryStateSerializer.serialize(&sample_state()).unwrap();
        assert!(matches!(
            BinaryStateSerializer.deserialize(&bytes[..10]),
            Err(SerializationError::Truncated)
        ));
        assert!(matches!(
            BinaryStateSerializer.deserialize(b"FC"),
            Err(SerializationError::Truncated)
        ));
    }

    #[test]
    fn test_flipped_bit_fails_checksum() {
        let mut bytes = BinaryStateSerializer.serialize(&sample_state()).unwrap();
        bytes[HEADER_SIZE + 3] ^= 0x10;
        assert!(matches!(
            BinaryStateSerializer.deserialize(&bytes),
            Err(SerializationError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = BinaryStateSerializer.serialize(&sample_state()).unwrap();
        bytes[4] = 9;
        reseal(&mut bytes);
        assert!(matches!(
            BinaryStateSerializer.deserialize(&bytes),
            Err(SerializationError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_unknown_material() {
        let mut bytes = BinaryStateSerializer.serialize(&sample_state()).unwrap();
        // Material byte of the first cell
        bytes[HEADER_SIZE + 8 + 4 + 1] = 200;
        reseal(&mut bytes);
        assert!(matches!(
            BinaryStateSerializer.deserialize(&bytes),
            Err(SerializationError::UnknownMaterial(200))
        ));
    }

    #[test]
    fn test_count_must_match_space() {
        let mut bytes = BinaryStateSerializer.serialize(&sample_state()).unwrap();
        // Claim a 4 x 2 x 2 space for 12 cells
        bytes[6] = 4;
        reseal(&mut bytes);
        assert!(matches!(
            BinaryStateSerializer.deserialize(&bytes),
            Err(SerializationError::CountMismatch { expected: 16, actual: 12 })
        ));
    }
}
