//! Image element backed by a decoded bitmap.

use super::{BitmapHandle, ElementId};
use kurbo::Point;
use serde::Serialize;

/// A bitmap placed on the stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageElement {
    pub id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    pub bitmap: BitmapHandle,
}

impl ImageElement {
    /// Create an image element `height` tall, with width following the
    /// bitmap's aspect ratio. A bitmap without a usable aspect ratio is
    /// displayed square.
    pub fn scaled_to_height(
        id: ElementId,
        bitmap: BitmapHandle,
        position: Point,
        height: f64,
    ) -> Self {
        let aspect = bitmap.aspect_ratio().unwrap_or(1.0);
        Self {
            id,
            position,
            width: height * aspect,
            height,
            bitmap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{MediaKey, new_element_id};
    use kurbo::Size;

    #[test]
    fn test_scaled_to_height_keeps_aspect() {
        let bitmap = BitmapHandle::new(MediaKey(7), Size::new(1920.0, 1080.0));
        let image = ImageElement::scaled_to_height(new_element_id(), bitmap, Point::ZERO, 200.0);
        assert_eq!(image.height, 200.0);
        assert!((image.width - 355.555).abs() < 0.01);
    }

    #[test]
    fn test_zero_height_bitmap_is_square() {
        let bitmap = BitmapHandle::new(MediaKey(7), Size::new(10.0, 0.0));
        let image = ImageElement::scaled_to_height(new_element_id(), bitmap, Point::ZERO, 200.0);
        assert_eq!(image.width, 200.0);
    }
}
