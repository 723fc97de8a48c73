//! Blueprint validation
//!
//! Catches blueprints that would build an empty or meaningless room before
//! a simulation is started from them.

use firecell_math::IVec3;

use crate::StateBlueprint;

/// Largest number of cells a room may have (256 x 256 x 256)
pub const MAX_SPACE_CELLS: i64 = 1 << 24;

/// Validation error found in a blueprint
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Blueprint name is empty or whitespace
    EmptyName,
    /// Space size has a non-positive component
    InvalidSpaceSize(IVec3),
    /// Space has more than [`MAX_SPACE_CELLS`] cells
    SpaceTooLarge(IVec3),
    /// Element at this position in the list has a non-positive size
    InvalidElementSize { element: usize, size: IVec3 },
    /// Element at this position in the list does not touch the room
    ElementOutsideSpace { element: usize },
    /// Element's far corner is not a representable cell index
    ElementOutOfRange { element: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "Blueprint has no name"),
            ValidationError::InvalidSpaceSize(size) => {
                write!(f, "Invalid space size {} (all components must be positive)", size)
            }
            ValidationError::SpaceTooLarge(size) => write!(
                f,
                "Space size {} has {} cells, more than the limit of {}",
                size,
                size.volume(),
                MAX_SPACE_CELLS
            ),
            ValidationError::InvalidElementSize { element, size } => {
                write!(f, "Element #{} has invalid size {}", element, size)
            }
            ValidationError::ElementOutsideSpace { element } => {
                write!(f, "Element #{} lies completely outside the room", element)
            }
            ValidationError::ElementOutOfRange { element } => {
                write!(f, "Element #{} extends past the largest possible cell index", element)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Static checks on a [`StateBlueprint`]
pub struct BlueprintValidator;

impl BlueprintValidator {
    /// Validate a blueprint, returning all errors found
    pub fn validate(blueprint: &StateBlueprint) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if blueprint.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
        }

        let space = blueprint.space_size;
        let space_valid = is_positive(space);
        if !space_valid {
            errors.push(ValidationError::InvalidSpaceSize(space));
        } else if space.volume() > MAX_SPACE_CELLS {
            errors.push(ValidationError::SpaceTooLarge(space));
        }

        for (i, element) in blueprint.elements.iter().enumerate() {
            let (position, size) = element.bounds();
            if !is_positive(size) {
                errors.push(ValidationError::InvalidElementSize { element: i, size });
                continue;
            }
            if end(position, size).is_none() {
                errors.push(ValidationError::ElementOutOfRange { element: i });
                continue;
            }
            if space_valid && !overlaps(position, size, space) {
                errors.push(ValidationError::ElementOutsideSpace { element: i });
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(blueprint: &StateBlueprint) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(blueprint);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_positive(v: IVec3) -> bool {
    v.x > 0 && v.y > 0 && v.z > 0
}

/// Exclusive far corner of a box, if every component fits in `i32`
fn end(position: IVec3, size: IVec3) -> Option<IVec3> {
    Some(IVec3::new(
        position.x.checked_add(size.x)?,
        position.y.checked_add(size.y)?,
        position.z.checked_add(size.z)?,
    ))
}

/// Whether the box at `position` of `size` shares a cell with `[0, space)`
fn overlaps(position: IVec3, size: IVec3, space: IVec3) -> bool {
    let Some(end) = end(position, size) else {
        return false;
    };
    position.x < space.x
        && position.y < space.y
        && position.z < space.z
        && end.x > 0
        && end.y > 0
        && end.z > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Element;
    use firecell_model::Material;

    fn valid() -> StateBlueprint {
        StateBlueprint::new("kitchen", IVec3::new(6, 4, 6))
            .with_element(Element::floor([0, 0], [6, 6]))
            .with_element(Element::ignition(IVec3::new(2, 0, 2), IVec3::ONE))
    }

    #[test]
    fn test_valid_blueprint_returns_no_errors() {
        assert!(BlueprintValidator::validate(&valid()).is_empty());
        assert!(BlueprintValidator::validate_or_error(&valid()).is_ok());
    }

    #[test]
    fn test_empty_name() {
        let mut blueprint = valid();
        blueprint.name = "   ".to_string();
        assert_eq!(BlueprintValidator::validate(&blueprint), vec![ValidationError::EmptyName]);
    }

    #[test]
    fn test_invalid_space_size() {
        let mut blueprint = valid();
        blueprint.space_size = IVec3::new(6, 0, 6);
        let errors = BlueprintValidator::validate(&blueprint);
        assert_eq!(errors, vec![ValidationError::InvalidSpaceSize(IVec3::new(6, 0, 6))]);
    }

    #[test]
    fn test_zero_sized_element() {
        let blueprint = valid().with_element(Element::cuboid(
            IVec3::ZERO,
            IVec3::new(2, 0, 2),
            Material::Wood,
        ));
        assert_eq!(
            BlueprintValidator::validate(&blueprint),
            vec![ValidationError::InvalidElementSize {
                element: 2,
                size: IVec3::new(2, 0, 2)
            }]
        );
    }

    #[test]
    fn test_element_outside_space() {
        let blueprint = valid()
            .with_element(Element::cuboid(IVec3::new(6, 0, 0), IVec3::ONE, Material::Wood))
            .with_element(Element::cuboid(IVec3::new(-3, 0, 0), IVec3::new(3, 1, 1), Material::Wood))
            // Partially inside is fine
            .with_element(Element::cuboid(IVec3::new(-1, 0, 0), IVec3::new(3, 1, 1), Material::Wood));
        assert_eq!(
            BlueprintValidator::validate(&blueprint),
            vec![
                ValidationError::ElementOutsideSpace { element: 2 },
                ValidationError::ElementOutsideSpace { element: 3 },
            ]
        );
    }

    #[test]
    fn test_huge_element_reported_without_overflow() {
        let blueprint = StateBlueprint::new("tiny", IVec3::splat(4)).with_element(Element::cuboid(
            IVec3::new(1, 0, 0),
            IVec3::new(i32::MAX, 1, 1),
            Material::Wood,
        ));
        assert_eq!(
            BlueprintValidator::validate(&blueprint),
            vec![ValidationError::ElementOutOfRange { element: 0 }]
        );
    }

    #[test]
    fn test_oversized_space() {
        let blueprint = StateBlueprint::new("hangar", IVec3::splat(100_000));
        assert_eq!(
            BlueprintValidator::validate(&blueprint),
            vec![ValidationError::SpaceTooLarge(IVec3::splat(100_000))]
        );
        let largest = StateBlueprint::new("hall", IVec3::splat(256));
        assert!(BlueprintValidator::validate(&largest).is_empty());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let blueprint = StateBlueprint::new("", IVec3::new(-1, 2, 2));
        assert_eq!(BlueprintValidator::validate(&blueprint).len(), 2);
    }
}
