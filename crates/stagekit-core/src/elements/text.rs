//! Text element.

use super::ElementId;
use kurbo::Point;
use serde::Serialize;

/// A single text run. Its extent is determined by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextElement {
    pub id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub content: String,
    pub font_size: f64,
}

impl TextElement {
    pub fn new(id: ElementId, content: String, position: Point, font_size: f64) -> Self {
        Self {
            id,
            position,
            content,
            font_size,
        }
    }
}
