//! Heat conduction coefficients between materials

use std::collections::HashMap;

use crate::Material;

/// Error raised when the conduction table does not cover every material pair
#[derive(Debug, Clone, PartialEq)]
pub enum ConductionError {
    /// No coefficient for this pair
    MissingPair(Material, Material),
    /// Table size differs from n(n+1)/2
    WrongCount { expected: usize, actual: usize },
}

impl std::fmt::Display for ConductionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConductionError::MissingPair(a, b) => {
                write!(f, "Missing conduction coefficient for {} and {}", a, b)
            }
            ConductionError::WrongCount { expected, actual } => write!(
                f,
                "Incorrect number of material relations: expected {}, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for ConductionError {}

/// Symmetric table of conduction coefficients
///
/// Keys are stored with the smaller material first so `(a, b)` and `(b, a)`
/// share one entry.
#[derive(Debug, Clone)]
pub struct ConductionMap {
    coefficients: HashMap<(Material, Material), f64>,
}

impl Default for ConductionMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ConductionMap {
    /// Table with the built-in material coefficients
    pub fn new() -> Self {
        use Material::*;

        let mut map = Self::empty();
        map.insert(Air, Air, 0.008);
        map.insert(Air, Wood, 0.02);
        map.insert(Air, CellularConcrete, 0.015);

        map.insert(Wood, Wood, 0.2);
        map.insert(Wood, CellularConcrete, 0.15);

        map.insert(CellularConcrete, CellularConcrete, 0.1);
        map
    }

    /// Table with no coefficients
    pub fn empty() -> Self {
        Self {
            coefficients: HashMap::new(),
        }
    }

    /// Set the coefficient for an unordered pair
    pub fn insert(&mut self, a: Material, b: Material, coefficient: f64) {
        self.coefficients.insert(Self::key(a, b), coefficient);
    }

    /// Coefficient for an unordered pair
    pub fn coefficient(&self, a: Material, b: Material) -> Option<f64> {
        self.coefficients.get(&Self::key(a, b)).copied()
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Check that every pair of materials has exactly one coefficient
    pub fn validate(&self) -> Result<(), ConductionError> {
        for a in Material::ALL {
            for b in Material::ALL {
                if self.coefficient(a, b).is_none() {
                    return Err(ConductionError::MissingPair(a, b));
                }
            }
        }

        let n = Material::ALL.len();
        let expected = n * (n + 1) / 2;
        if self.len() != expected {
            return Err(ConductionError::WrongCount {
                expected,
                actual: self.len(),
            });
        }
        Ok(())
    }

    fn key(a: Material, b: Material) -> (Material, Material) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}
