//! Editor configuration.

use kurbo::{Point, Size};

/// Default stage width in canvas units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
/// Default stage height in canvas units.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
/// Height new images are scaled to.
pub const DEFAULT_IMAGE_HEIGHT: f64 = 200.0;
/// Extent assumed by edge snapping for elements without an explicit size.
pub const DEFAULT_FALLBACK_EXTENT: f64 = 30.0;
/// Lower bound for sizes produced by a transform.
pub const DEFAULT_MIN_TRANSFORM_EXTENT: f64 = 5.0;
/// Font size for new text elements.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

/// Tunable parameters for an [`EditorSession`](crate::session::EditorSession).
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Stage extent used by edge snapping.
    pub canvas_size: Size,
    /// Where newly added elements are placed.
    pub spawn_position: Point,
    /// Height new images are scaled to, preserving aspect ratio.
    pub image_height: f64,
    /// Extent of the frame sink created for a video.
    pub video_frame_size: Size,
    /// Extent edge snapping assumes for elements without an explicit size.
    pub fallback_extent: f64,
    /// Lower bound for width, height and font size after a resize.
    pub min_transform_extent: f64,
    /// Font size for new text elements.
    pub default_font_size: f64,
    /// Maximum undo depth. `None` keeps every entry.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            spawn_position: Point::new(100.0, 100.0),
            image_height: DEFAULT_IMAGE_HEIGHT,
            video_frame_size: Size::new(420.0, 280.0),
            fallback_extent: DEFAULT_FALLBACK_EXTENT,
            min_transform_extent: DEFAULT_MIN_TRANSFORM_EXTENT,
            default_font_size: DEFAULT_FONT_SIZE,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Set the stage extent.
    pub fn with_canvas_size(mut self, size: Size) -> Self {
        self.canvas_size = size;
        self
    }

    /// Set where new elements are placed.
    pub fn with_spawn_position(mut self, position: Point) -> Self {
        self.spawn_position = position;
        self
    }

    /// Set the height new images are scaled to.
    pub fn with_image_height(mut self, height: f64) -> Self {
        self.image_height = height;
        self
    }

    /// Set the frame sink extent for new videos.
    pub fn with_video_frame_size(mut self, size: Size) -> Self {
        self.video_frame_size = size;
        self
    }

    /// Set the extent snapping assumes for unsized elements.
    pub fn with_fallback_extent(mut self, extent: f64) -> Self {
        self.fallback_extent = extent;
        self
    }

    /// Set the lower bound applied when folding resize scale.
    pub fn with_min_transform_extent(mut self, extent: f64) -> Self {
        self.min_transform_extent = extent;
        self
    }

    /// Set the font size for new text elements.
    pub fn with_default_font_size(mut self, size: f64) -> Self {
        self.default_font_size = size;
        self
    }

    /// Cap the undo depth.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }
}
