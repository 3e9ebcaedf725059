//! Commands and the edits that produce new element stores.

use crate::config::EditorConfig;
use crate::elements::{Edge, Element, ElementContent, ElementId, GeometryPatch};
use crate::error::MediaError;
use crate::media::LoadId;
use crate::selection::NodeGeometry;
use crate::store::ElementStore;
use crate::toolbar::Trigger;
use kurbo::Point;
use thiserror::Error;

/// A store-mutating edit. Every applied edit is recorded in history.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    AddElement {
        id: ElementId,
        content: ElementContent,
        position: Point,
    },
    /// Move the selected element to the top of the z-order.
    BringToFront,
    /// Move the selected element to the bottom of the z-order.
    SendToBack,
    /// Move the selected element flush against a stage edge.
    SnapEdge(Edge),
    /// Final position reported at the end of a drag.
    MoveElement { id: ElementId, position: Point },
    /// Geometry read from a node at the end of a resize.
    TransformElement { id: ElementId, geometry: NodeGeometry },
    RemoveElement { id: ElementId },
}

impl Edit {
    /// Compute the store that results from this edit.
    pub fn apply(
        &self,
        store: &ElementStore,
        selected: Option<ElementId>,
        config: &EditorConfig,
    ) -> Result<ElementStore, Skip> {
        match self {
            Edit::AddElement {
                id,
                content,
                position,
            } => {
                if matches!(content, ElementContent::Text(text) if text.is_empty()) {
                    return Err(Skip::EmptyText);
                }
                let element = Element::from_content(
                    *id,
                    content.clone(),
                    *position,
                    config.image_height,
                    config.default_font_size,
                );
                store.append(element).ok_or(Skip::DuplicateElement(*id))
            }
            Edit::BringToFront => {
                let id = selected.ok_or(Skip::NoSelection)?;
                store.reorder_to_front(id).ok_or(Skip::UnknownElement(id))
            }
            Edit::SendToBack => {
                let id = selected.ok_or(Skip::NoSelection)?;
                store.reorder_to_back(id).ok_or(Skip::UnknownElement(id))
            }
            Edit::SnapEdge(edge) => {
                let id = selected.ok_or(Skip::NoSelection)?;
                store
                    .set_anchor_edge(id, *edge, config.canvas_size, config.fallback_extent)
                    .ok_or(Skip::UnknownElement(id))
            }
            Edit::MoveElement { id, position } => store
                .update_geometry(*id, &GeometryPatch::moved_to(*position))
                .ok_or(Skip::UnknownElement(*id)),
            Edit::TransformElement { id, geometry } => {
                let element = store.get(*id).ok_or(Skip::UnknownElement(*id))?;
                let patch = geometry.fold_into(element, config.min_transform_extent);
                store
                    .update_geometry(*id, &patch)
                    .ok_or(Skip::UnknownElement(*id))
            }
            Edit::RemoveElement { id } => store.remove(*id).ok_or(Skip::UnknownElement(*id)),
        }
    }
}

/// Anything the session can be asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Edit(Edit),
    Undo,
    Redo,
    /// Select an element, or clear the selection (background click).
    Select(Option<ElementId>),
}

impl From<Edit> for Command {
    fn from(edit: Edit) -> Self {
        Command::Edit(edit)
    }
}

/// Why a command left the session unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Skip {
    #[error("No element selected")]
    NoSelection,
    #[error("Element not found: {0}")]
    UnknownElement(ElementId),
    #[error("Empty text entry")]
    EmptyText,
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Nothing to redo")]
    NothingToRedo,
    #[error("Element already exists: {0}")]
    DuplicateElement(ElementId),
    #[error("Element is not a video: {0}")]
    NotAVideo(ElementId),
    #[error("Video not ready: {0}")]
    MediaNotReady(ElementId),
    #[error("Unknown media load {0}")]
    UnknownLoad(LoadId),
    #[error("Trigger '{0}' needs input")]
    NeedsInput(Trigger),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("Session is closed")]
    SessionClosed,
}

/// Result of dispatching a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    Skipped(Skip),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn skip(&self) -> Option<&Skip> {
        match self {
            Outcome::Applied => None,
            Outcome::Skipped(skip) => Some(skip),
        }
    }
}

impl From<Result<(), Skip>> for Outcome {
    fn from(result: Result<(), Skip>) -> Self {
        match result {
            Ok(()) => Outcome::Applied,
            Err(skip) => Outcome::Skipped(skip),
        }
    }
}
