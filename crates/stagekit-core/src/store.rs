//! Immutable, ordered collection of scene elements.
//!
//! Order is z-order: index 0 is rendered first (bottom-most). Every operation
//! returns a new store and leaves the receiver untouched, so a store can be
//! kept as a history snapshot by cloning it.

use crate::elements::{Edge, Element, ElementId, GeometryPatch};
use kurbo::{Point, Size};
use std::sync::Arc;

/// Ordered, copy-on-write list of elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStore {
    elements: Arc<[Element]>,
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn from_vec(elements: Vec<Element>) -> Self {
        Self {
            elements: elements.into(),
        }
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Element ids in z-order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().map(Element::id)
    }

    /// Whether two stores share the same backing allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }

    /// Add an element on top. Returns `None` if the id is already present.
    pub fn append(&self, element: Element) -> Option<Self> {
        if self.contains(element.id()) {
            return None;
        }
        let mut elements = self.elements.to_vec();
        elements.push(element);
        Some(Self::from_vec(elements))
    }

    /// Move an element to the end of the order. Others keep their relative order.
    pub fn reorder_to_front(&self, id: ElementId) -> Option<Self> {
        let index = self.index_of(id)?;
        let mut elements = self.elements.to_vec();
        let element = elements.remove(index);
        elements.push(element);
        Some(Self::from_vec(elements))
    }

    /// Move an element to the start of the order.
    pub fn reorder_to_back(&self, id: ElementId) -> Option<Self> {
        let index = self.index_of(id)?;
        let mut elements = self.elements.to_vec();
        let element = elements.remove(index);
        elements.insert(0, element);
        Some(Self::from_vec(elements))
    }

    /// Apply a geometry patch to one element.
    pub fn update_geometry(&self, id: ElementId, patch: &GeometryPatch) -> Option<Self> {
        let index = self.index_of(id)?;
        let mut elements = self.elements.to_vec();
        elements[index].apply_patch(patch);
        Some(Self::from_vec(elements))
    }

    /// Move an element flush against an edge of a `canvas` sized stage.
    pub fn set_anchor_edge(
        &self,
        id: ElementId,
        edge: Edge,
        canvas: Size,
        fallback: f64,
    ) -> Option<Self> {
        let position: Point = self.get(id)?.anchored_position(edge, canvas, fallback);
        self.update_geometry(id, &GeometryPatch::moved_to(position))
    }

    /// Remove an element.
    pub fn remove(&self, id: ElementId) -> Option<Self> {
        let index = self.index_of(id)?;
        let mut elements = self.elements.to_vec();
        elements.remove(index);
        Some(Self::from_vec(elements))
    }

    /// Serialize the elements to pretty JSON for diagnostics.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&*self.elements)
    }
}
