//! Rendering collaborator interface.
//!
//! The core never draws. After every change it hands the ordered elements and
//! the selected id to a [`SceneView`], and asks the view for live node handles
//! when binding the transform overlay.

use crate::elements::{Element, ElementId};
use crate::selection::NodeGeometry;
use crate::store::ElementStore;
use std::collections::HashMap;

/// Live handle to a rendered node.
///
/// The generation changes whenever the view rebuilds the node, so two handles
/// for the same element compare unequal across redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub element: ElementId,
    pub generation: u64,
}

/// A surface that renders the scene and owns the transform overlay.
pub trait SceneView {
    /// Re-read the elements and redraw them in order.
    fn redraw(&mut self, store: &ElementStore, selected: Option<ElementId>);

    /// Live node for an element, if the element is currently rendered.
    fn node(&self, id: ElementId) -> Option<NodeRef>;

    /// Bind the transform overlay to a node, replacing any previous binding.
    fn attach_overlay(&mut self, node: NodeRef);

    /// Remove the transform overlay.
    fn detach_overlay(&mut self);
}

/// Calls observed by a [`HeadlessView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Redraw {
        order: Vec<ElementId>,
        selected: Option<ElementId>,
    },
    Attach(NodeRef),
    Detach,
}

/// A view that renders nothing and records what it was asked to do.
#[derive(Debug, Default)]
pub struct HeadlessView {
    generation: u64,
    drawn: HashMap<ElementId, Element>,
    overlay: Option<NodeRef>,
    calls: Vec<ViewCall>,
}

impl HeadlessView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node the overlay is bound to.
    pub fn overlay(&self) -> Option<NodeRef> {
        self.overlay
    }

    pub fn calls(&self) -> &[ViewCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<ViewCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of redraws performed so far.
    pub fn redraw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ViewCall::Redraw { .. }))
            .count()
    }

    /// Geometry a user transform would leave on the node for `id`: the drawn
    /// element's extent with the given scale factors applied.
    pub fn scaled_geometry(&self, id: ElementId, scale_x: f64, scale_y: f64) -> Option<NodeGeometry> {
        let element = self.drawn.get(&id)?;
        let position = element.position();
        let size = element.size().unwrap_or_default();
        Some(NodeGeometry {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            scale_x,
            scale_y,
        })
    }
}

impl SceneView for HeadlessView {
    fn redraw(&mut self, store: &ElementStore, selected: Option<ElementId>) {
        self.generation += 1;
        self.drawn = store
            .elements()
            .iter()
            .map(|element| (element.id(), element.clone()))
            .collect();
        let overlay_gone = self
            .overlay
            .is_some_and(|node| !self.drawn.contains_key(&node.element));
        if overlay_gone {
            self.overlay = None;
        }
        self.calls.push(ViewCall::Redraw {
            order: store.ids().collect(),
            selected,
        });
    }

    fn node(&self, id: ElementId) -> Option<NodeRef> {
        self.drawn.contains_key(&id).then_some(NodeRef {
            element: id,
            generation: self.generation,
        })
    }

    fn attach_overlay(&mut self, node: NodeRef) {
        self.overlay = Some(node);
        self.calls.push(ViewCall::Attach(node));
    }

    fn detach_overlay(&mut self) {
        self.overlay = None;
        self.calls.push(ViewCall::Detach);
    }
}
