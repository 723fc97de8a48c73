//! Building initial states from elements

use firecell_math::IVec3;
use firecell_model::{Material, State, StateError};

use crate::Element;

/// Collects elements and renders them into a [`State`]
///
/// The state starts as air at room temperature with full oxygen; elements
/// are applied in insertion order.
#[derive(Debug, Clone)]
pub struct StateBuilder {
    space_size: IVec3,
    elements: Vec<Element>,
}

impl StateBuilder {
    pub fn new(space_size: IVec3) -> Self {
        Self {
            space_size,
            elements: Vec::new(),
        }
    }

    pub fn space_size(&self) -> IVec3 {
        self.space_size
    }

    pub fn set_space_size(&mut self, space_size: IVec3) {
        self.space_size = space_size;
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn add_element(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// Remove the first element equal to `element`; false if there was none
    pub fn remove_element(&mut self, element: &Element) -> bool {
        match self.elements.iter().position(|e| e == element) {
            Some(position) => {
                self.elements.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn last_element(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn add_cuboid(&mut self, position: IVec3, size: IVec3, material: Material) -> &mut Self {
        self.add_element(Element::cuboid(position, size, material))
    }

    pub fn ignite_cuboid(&mut self, position: IVec3, size: IVec3) -> &mut Self {
        self.add_element(Element::ignition(position, size))
    }

    /// Render the elements into a fresh state
    pub fn build(&self) -> Result<State, StateError> {
        let mut state = State::empty(self.space_size)?;
        for element in &self.elements {
            element.apply(&mut state);
        }
        log::debug!(
            "Built state {} from {} elements",
            self.space_size,
            self.elements.len()
        );
        Ok(state)
    }
}
