//! Scene elements: images, videos and text placed on the stage.

mod image;
mod text;
mod video;

pub use image::ImageElement;
pub use text::TextElement;
pub use video::VideoElement;

use kurbo::{Point, Size};
use serde::Serialize;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Generate a fresh element identifier.
pub fn new_element_id() -> ElementId {
    Uuid::now_v7()
}

/// Opaque key for a decoded media resource owned by the media collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MediaKey(pub u64);

/// A decoded bitmap and its natural pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BitmapHandle {
    pub key: MediaKey,
    pub natural_size: Size,
}

impl BitmapHandle {
    pub fn new(key: MediaKey, natural_size: Size) -> Self {
        Self { key, natural_size }
    }

    /// Natural width divided by natural height, if the height is non-zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.natural_size.height > 0.0 && self.natural_size.width.is_finite() {
            Some(self.natural_size.width / self.natural_size.height)
        } else {
            None
        }
    }
}

/// A surface the media collaborator keeps painting the current video frame into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSinkHandle {
    pub key: MediaKey,
    pub frame_size: Size,
}

impl FrameSinkHandle {
    pub fn new(key: MediaKey, frame_size: Size) -> Self {
        Self { key, frame_size }
    }
}

/// Stage edge used by snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Kind tag for [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Image,
    Video,
    Text,
}

/// Payload carried by an add-element edit.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    Image(BitmapHandle),
    Video(FrameSinkHandle),
    Text(String),
}

/// Partial geometry update. Text ignores `size`; media ignore `font_size`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryPatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub font_size: Option<f64>,
}

impl GeometryPatch {
    /// A patch that only moves the element.
    pub fn moved_to(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }
}

/// An element placed on the stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Element {
    Image(ImageElement),
    Video(VideoElement),
    Text(TextElement),
}

impl Element {
    /// Build an element from add-edit content.
    pub fn from_content(
        id: ElementId,
        content: ElementContent,
        position: Point,
        image_height: f64,
        font_size: f64,
    ) -> Self {
        match content {
            ElementContent::Image(bitmap) => {
                Element::Image(ImageElement::scaled_to_height(id, bitmap, position, image_height))
            }
            ElementContent::Video(sink) => Element::Video(VideoElement::new(id, sink, position)),
            ElementContent::Text(content) => {
                Element::Text(TextElement::new(id, content, position, font_size))
            }
        }
    }

    pub fn id(&self) -> ElementId {
        match self {
            Element::Image(e) => e.id,
            Element::Video(e) => e.id,
            Element::Text(e) => e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Image(_) => ElementKind::Image,
            Element::Video(_) => ElementKind::Video,
            Element::Text(_) => ElementKind::Text,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Element::Image(e) => e.position,
            Element::Video(e) => e.position,
            Element::Text(e) => e.position,
        }
    }

    /// Explicit size, if the element has one. Text is sized by its content.
    pub fn size(&self) -> Option<Size> {
        match self {
            Element::Image(e) => Some(Size::new(e.width, e.height)),
            Element::Video(e) => Some(Size::new(e.width, e.height)),
            Element::Text(_) => None,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Element::Image(e) => e.position = position,
            Element::Video(e) => e.position = position,
            Element::Text(e) => e.position = position,
        }
    }

    /// Apply the fields of `patch` that make sense for this kind.
    pub fn apply_patch(&mut self, patch: &GeometryPatch) {
        if let Some(position) = patch.position {
            self.set_position(position);
        }
        match self {
            Element::Image(e) => {
                if let Some(size) = patch.size {
                    e.width = size.width;
                    e.height = size.height;
                }
            }
            Element::Video(e) => {
                if let Some(size) = patch.size {
                    e.width = size.width;
                    e.height = size.height;
                }
            }
            Element::Text(e) => {
                if let Some(font_size) = patch.font_size {
                    e.font_size = font_size;
                }
            }
        }
    }

    /// Position this element would take when anchored to `edge` of a stage of
    /// `canvas` extent. Only the coordinate perpendicular to the edge changes.
    pub fn anchored_position(&self, edge: Edge, canvas: Size, fallback: f64) -> Point {
        let position = self.position();
        let size = self.size();
        let width = size.map(|s| s.width).unwrap_or(fallback);
        let height = size.map(|s| s.height).unwrap_or(fallback);
        match edge {
            Edge::Top => Point::new(position.x, 0.0),
            Edge::Bottom => Point::new(position.x, canvas.height - height),
            Edge::Left => Point::new(0.0, position.y),
            Edge::Right => Point::new(canvas.width - width, position.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> Element {
        let bitmap = BitmapHandle::new(MediaKey(1), Size::new(400.0, 200.0));
        Element::from_content(
            new_element_id(),
            ElementContent::Image(bitmap),
            Point::new(100.0, 100.0),
            200.0,
            20.0,
        )
    }

    #[test]
    fn test_anchor_edges_with_size() {
        let image = sample_image();
        let canvas = Size::new(1200.0, 600.0);
        assert_eq!(image.anchored_position(Edge::Top, canvas, 30.0), Point::new(100.0, 0.0));
        assert_eq!(image.anchored_position(Edge::Bottom, canvas, 30.0), Point::new(100.0, 400.0));
        assert_eq!(image.anchored_position(Edge::Left, canvas, 30.0), Point::new(0.0, 100.0));
        assert_eq!(image.anchored_position(Edge::Right, canvas, 30.0), Point::new(800.0, 100.0));
    }

    #[test]
    fn test_anchor_uses_fallback_for_text() {
        let text = Element::Text(TextElement::new(
            new_element_id(),
            "Hi".to_string(),
            Point::new(40.0, 50.0),
            20.0,
        ));
        let canvas = Size::new(1200.0, 600.0);
        assert_eq!(text.anchored_position(Edge::Right, canvas, 30.0), Point::new(1170.0, 50.0));
        assert_eq!(text.anchored_position(Edge::Bottom, canvas, 30.0), Point::new(40.0, 570.0));
    }

    #[test]
    fn test_patch_respects_kind() {
        let mut text = Element::Text(TextElement::new(
            new_element_id(),
            "Hi".to_string(),
            Point::ZERO,
            20.0,
        ));
        text.apply_patch(&GeometryPatch {
            position: Some(Point::new(5.0, 6.0)),
            size: Some(Size::new(99.0, 99.0)),
            font_size: Some(40.0),
        });
        assert_eq!(text.position(), Point::new(5.0, 6.0));
        assert_eq!(text.size(), None);
        match text {
            Element::Text(t) => assert_eq!(t.font_size, 40.0),
            _ => panic!("expected text"),
        }

        let mut image = sample_image();
        image.apply_patch(&GeometryPatch {
            size: Some(Size::new(10.0, 20.0)),
            font_size: Some(40.0),
            ..Default::default()
        });
        assert_eq!(image.size(), Some(Size::new(10.0, 20.0)));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(new_element_id(), new_element_id());
    }
}
