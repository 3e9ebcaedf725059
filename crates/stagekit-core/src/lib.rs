//! StageKit Core Library
//!
//! Scene model, undo/redo history, selection binding and command dispatch for
//! a single-canvas media editor. Rendering and media decoding are external
//! collaborators reached through the traits in [`render`] and [`media`].

pub mod command;
pub mod config;
pub mod elements;
pub mod error;
pub mod history;
pub mod media;
pub mod render;
pub mod selection;
pub mod session;
pub mod store;
pub mod toolbar;

pub use command::{Command, Edit, Outcome, Skip};
pub use config::EditorConfig;
pub use elements::{
    BitmapHandle, Edge, Element, ElementContent, ElementId, ElementKind, FrameSinkHandle,
    GeometryPatch, ImageElement, MediaKey, TextElement, VideoElement, new_element_id,
};
pub use error::{MediaError, MediaResult};
pub use history::History;
pub use media::{
    DecodedImage, DecodedVideo, FrameDriver, FrameLoop, ImageLoad, LoadId, MediaEvent, MediaInbox,
    ResourceTable, VideoLoad, VideoPlayback, VideoResource,
};
pub use render::{HeadlessView, NodeRef, SceneView, ViewCall};
pub use selection::{NodeGeometry, SelectionBinder};
pub use session::EditorSession;
pub use store::ElementStore;
pub use toolbar::{ParseTriggerError, ToolbarState, Trigger};
