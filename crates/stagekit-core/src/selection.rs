//! Selection tracking and transform-overlay binding.

use crate::elements::{Element, ElementId, GeometryPatch};
use crate::render::{NodeRef, SceneView};
use crate::store::ElementStore;
use kurbo::{Point, Size};

/// Geometry read back from a live node after a drag or resize gesture.
///
/// The renderer applies resize gestures as scale factors; these are folded
/// back into the element's own extent so stored geometry is always unscaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl NodeGeometry {
    /// Unscaled geometry at a position.
    pub fn at(position: Point, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Patch that normalizes the scale back to 1 for `element`.
    ///
    /// Media fold the scale into width and height. Text folds the horizontal
    /// scale into its font size. Results are clamped to `min_extent`.
    pub fn fold_into(&self, element: &Element, min_extent: f64) -> GeometryPatch {
        let position = Some(Point::new(self.x, self.y));
        match element {
            Element::Text(text) => GeometryPatch {
                position,
                size: None,
                font_size: Some((text.font_size * self.scale_x).max(min_extent)),
            },
            Element::Image(_) | Element::Video(_) => GeometryPatch {
                position,
                size: Some(Size::new(
                    (self.width * self.scale_x).max(min_extent),
                    (self.height * self.scale_y).max(min_extent),
                )),
                font_size: None,
            },
        }
    }
}

/// Tracks the selected element and keeps the transform overlay bound to its
/// live node.
#[derive(Debug, Clone, Default)]
pub struct SelectionBinder {
    selected: Option<ElementId>,
    bound: Option<NodeRef>,
}

impl SelectionBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected element.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Node the overlay was last bound to.
    pub fn bound_node(&self) -> Option<NodeRef> {
        self.bound
    }

    /// Select an element, or clear the selection with `None`, and bind the
    /// overlay to its current node.
    pub fn select<V: SceneView>(&mut self, id: Option<ElementId>, view: &mut V) {
        self.set(id);
        self.rebind(view);
    }

    /// Change the selected id without touching the overlay.
    pub fn set(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    /// Clear a selection whose element is no longer in `store`.
    /// Returns `true` if the selection was cleared.
    pub fn prune(&mut self, store: &ElementStore) -> bool {
        match self.selected {
            Some(id) if !store.contains(id) => {
                log::debug!("Selected element {} no longer exists, clearing selection", id);
                self.selected = None;
                true
            }
            _ => false,
        }
    }

    /// Prune against `store`, then re-bind to whatever node the view now holds.
    pub fn sync<V: SceneView>(&mut self, store: &ElementStore, view: &mut V) -> bool {
        let cleared = self.prune(store);
        self.rebind(view);
        cleared
    }

    /// Bind the overlay to the selected element's live node, or detach it
    /// when nothing is selected.
    pub fn rebind<V: SceneView>(&mut self, view: &mut V) {
        match self.selected.and_then(|id| view.node(id)) {
            Some(node) => {
                view.attach_overlay(node);
                self.bound = Some(node);
            }
            None => {
                if self.bound.take().is_some() || self.selected.is_none() {
                    view.detach_overlay();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{BitmapHandle, ImageElement, MediaKey, TextElement, new_element_id};
    use crate::render::{HeadlessView, ViewCall};

    fn image_store() -> (ElementStore, ElementId) {
        let bitmap = BitmapHandle::new(MediaKey(1), Size::new(100.0, 100.0));
        let image = ImageElement::scaled_to_height(new_element_id(), bitmap, Point::ZERO, 200.0);
        let id = image.id;
        (ElementStore::new().append(Element::Image(image)).unwrap(), id)
    }

    #[test]
    fn test_select_binds_overlay() {
        let (store, id) = image_store();
        let mut view = HeadlessView::new();
        view.redraw(&store, None);

        let mut binder = SelectionBinder::new();
        binder.select(Some(id), &mut view);
        assert_eq!(binder.selected(), Some(id));
        assert_eq!(view.overlay(), view.node(id));

        binder.select(None, &mut view);
        assert_eq!(binder.selected(), None);
        assert_eq!(view.overlay(), None);
        assert_eq!(view.calls().last(), Some(&ViewCall::Detach));
    }

    #[test]
    fn test_sync_rebinds_to_new_node() {
        let (store, id) = image_store();
        let mut view = HeadlessView::new();
        view.redraw(&store, None);

        let mut binder = SelectionBinder::new();
        binder.select(Some(id), &mut view);
        let first = binder.bound_node().unwrap();

        view.redraw(&store, Some(id));
        assert!(!binder.sync(&store, &mut view));
        let second = binder.bound_node().unwrap();
        assert_ne!(first, second);
        assert_eq!(view.overlay(), Some(second));
    }

    #[test]
    fn test_sync_clears_missing_selection() {
        let (store, id) = image_store();
        let mut view = HeadlessView::new();
        view.redraw(&store, None);

        let mut binder = SelectionBinder::new();
        binder.select(Some(id), &mut view);

        let empty = ElementStore::new();
        view.redraw(&empty, None);
        assert!(binder.sync(&empty, &mut view));
        assert_eq!(binder.selected(), None);
        assert_eq!(binder.bound_node(), None);
    }

    #[test]
    fn test_fold_media_scale() {
        let (store, id) = image_store();
        let element = store.get(id).unwrap();
        let geometry = NodeGeometry {
            x: 10.0,
            y: 20.0,
            width: 200.0,
            height: 200.0,
            scale_x: 1.5,
            scale_y: 0.01,
        };
        let patch = geometry.fold_into(element, 5.0);
        assert_eq!(patch.position, Some(Point::new(10.0, 20.0)));
        assert_eq!(patch.size, Some(Size::new(300.0, 5.0)));
        assert_eq!(patch.font_size, None);
    }

    #[test]
    fn test_fold_text_scale_into_font() {
        let text = Element::Text(TextElement::new(
            new_element_id(),
            "Hi".to_string(),
            Point::ZERO,
            20.0,
        ));
        let geometry = NodeGeometry {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            scale_x: 2.0,
            scale_y: 2.0,
        };
        let patch = geometry.fold_into(&text, 5.0);
        assert_eq!(patch.font_size, Some(40.0));
        assert_eq!(patch.size, None);

        let shrunk = NodeGeometry { scale_x: 0.1, ..geometry };
        assert_eq!(shrunk.fold_into(&text, 5.0).font_size, Some(5.0));
    }
}
