//! Video element showing frames from a frame sink.

use super::{ElementId, FrameSinkHandle};
use kurbo::Point;
use serde::Serialize;

/// A video frame surface placed on the stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoElement {
    pub id: ElementId,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub sink: FrameSinkHandle,
}

impl VideoElement {
    /// Create a video element sized to its frame sink.
    pub fn new(id: ElementId, sink: FrameSinkHandle, position: Point) -> Self {
        Self {
            id,
            position,
            width: sink.frame_size.width,
            height: sink.frame_size.height,
            sink,
        }
    }
}
