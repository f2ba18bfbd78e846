use building_ops::GeometryElement;
use scene_kernel::SolidHandle;
use storefront_types::Role;

use crate::error::BuildError;

/// The named elements of one built building, in creation order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: Vec<GeometryElement>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element. Names are unique within a scene.
    pub fn insert(&mut self, element: GeometryElement) -> Result<(), BuildError> {
        if self.contains(&element.name) {
            return Err(BuildError::DuplicateElement { name: element.name });
        }
        self.elements.push(element);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&GeometryElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn elements(&self) -> &[GeometryElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &GeometryElement> {
        self.elements.iter().filter(move |e| e.role == role)
    }

    pub fn names(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn handles(&self) -> Vec<SolidHandle> {
        self.elements.iter().map(|e| e.handle.clone()).collect()
    }

    /// The subset of `required` not present in the scene, in order.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }
}
