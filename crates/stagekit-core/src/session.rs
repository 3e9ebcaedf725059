//! Editor session: the single owner of scene state.
//!
//! All mutations run through [`EditorSession::dispatch`], which computes the
//! next store from the current one, records the previous store in history and
//! then installs the result. Installing redraws the view, keeps the selection
//! bound to a live node and reconciles per-element playback resources.

use crate::command::{Command, Edit, Outcome, Skip};
use crate::config::EditorConfig;
use crate::elements::{
    Edge, ElementContent, ElementId, ElementKind, FrameSinkHandle, new_element_id,
};
use crate::error::MediaError;
use crate::history::History;
use crate::media::{
    ImageLoad, LoadId, MediaEvent, MediaInbox, ResourceTable, VideoLoad, VideoResource,
};
use crate::render::SceneView;
use crate::selection::SelectionBinder;
use crate::store::ElementStore;
use crate::toolbar::{ToolbarState, Trigger};
use std::collections::{HashMap, HashSet};

/// A running editor bound to one rendering view.
pub struct EditorSession<V: SceneView> {
    config: EditorConfig,
    store: ElementStore,
    history: History,
    selection: SelectionBinder,
    toolbar: ToolbarState,
    resources: ResourceTable,
    /// `None` once the session is shut down.
    inbox: Option<MediaInbox>,
    pending_images: HashSet<LoadId>,
    /// Video loads, with the element id once decoding has produced one.
    pending_videos: HashMap<LoadId, Option<ElementId>>,
    view: V,
}

impl<V: SceneView> EditorSession<V> {
    /// Create a session with default configuration.
    pub fn new(view: V) -> Self {
        Self::with_config(view, EditorConfig::default())
    }

    pub fn with_config(mut view: V, config: EditorConfig) -> Self {
        let store = ElementStore::new();
        view.redraw(&store, None);
        Self {
            history: History::with_limit(config.history_limit),
            config,
            store,
            selection: SelectionBinder::new(),
            toolbar: ToolbarState::default(),
            resources: ResourceTable::new(),
            inbox: Some(MediaInbox::new()),
            pending_images: HashSet::new(),
            pending_videos: HashMap::new(),
            view,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The current element store.
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selection.selected()
    }

    pub fn toolbar(&self) -> &ToolbarState {
        &self.toolbar
    }

    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn is_closed(&self) -> bool {
        self.inbox.is_none()
    }

    /// Media loads that have not produced an element yet.
    pub fn pending_loads(&self) -> usize {
        self.pending_images.len() + self.pending_videos.values().filter(|id| id.is_none()).count()
    }

    /// Whether the video element `id` is currently playing.
    pub fn is_playing(&self, id: ElementId) -> bool {
        self.resources.get(id).is_some_and(VideoResource::is_playing)
    }

    /// Whether the toolbar should show video controls.
    pub fn video_controls_visible(&self) -> bool {
        ToolbarState::video_controls_visible(&self.store, self.selection.selected())
    }

    /// Execute a command.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        self.run(|session| match command {
            Command::Edit(edit) => session.apply_edit(&edit),
            Command::Undo => session.step_back(),
            Command::Redo => session.step_forward(),
            Command::Select(id) => session.change_selection(id),
        })
    }

    pub fn undo(&mut self) -> Outcome {
        self.dispatch(Command::Undo)
    }

    pub fn redo(&mut self) -> Outcome {
        self.dispatch(Command::Redo)
    }

    pub fn select(&mut self, id: Option<ElementId>) -> Outcome {
        self.dispatch(Command::Select(id))
    }

    /// Add a text element at the spawn position. Empty text is a cancellation.
    pub fn add_text(&mut self, content: &str) -> Outcome {
        self.dispatch(Command::Edit(Edit::AddElement {
            id: new_element_id(),
            content: ElementContent::Text(content.to_string()),
            position: self.config.spawn_position,
        }))
    }

    /// Fire a toolbar trigger that takes no input.
    pub fn fire(&mut self, trigger: Trigger) -> Outcome {
        match trigger {
            Trigger::AddText | Trigger::AddImage | Trigger::AddVideo => {
                self.run(|_| Err(Skip::NeedsInput(trigger)))
            }
            Trigger::Undo => self.undo(),
            Trigger::Redo => self.redo(),
            Trigger::BringToFront => self.dispatch(Edit::BringToFront.into()),
            Trigger::SendToBack => self.dispatch(Edit::SendToBack.into()),
            Trigger::TogglePositionPanel => self.run(|session| {
                session.toolbar.toggle_position_panel();
                Ok(())
            }),
            Trigger::SnapTop => self.dispatch(Edit::SnapEdge(Edge::Top).into()),
            Trigger::SnapBottom => self.dispatch(Edit::SnapEdge(Edge::Bottom).into()),
            Trigger::SnapLeft => self.dispatch(Edit::SnapEdge(Edge::Left).into()),
            Trigger::SnapRight => self.dispatch(Edit::SnapEdge(Edge::Right).into()),
            Trigger::PlayPause => self.play_pause(),
            Trigger::ForcePause => self.force_pause(),
            Trigger::Stop => self.stop_playback(),
        }
    }

    /// Toggle playback of the selected video.
    pub fn play_pause(&mut self) -> Outcome {
        self.run(|session| {
            let resource = session.selected_video()?;
            if resource.is_playing() {
                resource.pause();
            } else {
                resource.play()?;
            }
            Ok(())
        })
    }

    /// Pause the selected video.
    pub fn force_pause(&mut self) -> Outcome {
        self.run(|session| {
            session.selected_video()?.pause();
            Ok(())
        })
    }

    /// Pause the selected video and rewind it.
    pub fn stop_playback(&mut self) -> Outcome {
        self.run(|session| {
            session.selected_video()?.stop();
            Ok(())
        })
    }

    /// Register an image load. The returned ticket is handed to the decoder.
    pub fn begin_image_load(&mut self, source: &str) -> Option<ImageLoad> {
        let ticket = self.inbox.as_mut()?.image_ticket();
        log::info!("Loading image {} from {}", ticket.id(), source);
        self.pending_images.insert(ticket.id());
        Some(ticket)
    }

    /// Register a video load. The returned ticket is handed to the decoder.
    pub fn begin_video_load(&mut self, source: &str) -> Option<VideoLoad> {
        let ticket = self.inbox.as_mut()?.video_ticket();
        log::info!("Loading video {} from {}", ticket.id(), source);
        self.pending_videos.insert(ticket.id(), None);
        Some(ticket)
    }

    /// Apply every media completion received since the last pump, in order.
    pub fn pump(&mut self) -> Vec<Outcome> {
        let events = match &self.inbox {
            Some(inbox) => inbox.drain(),
            None => return Vec::new(),
        };
        events
            .into_iter()
            .map(|event| self.run(|session| session.apply_media_event(event)))
            .collect()
    }

    /// End the session. Pending loads are abandoned, playback resources are
    /// released and every later command is skipped.
    pub fn shutdown(&mut self) {
        if self.is_closed() {
            return;
        }
        let abandoned = self.pending_loads();
        self.inbox = None;
        self.pending_images.clear();
        self.pending_videos.clear();
        self.resources.release_all();
        self.selection.select(None, &mut self.view);
        log::info!("Editor session closed, {} pending loads abandoned", abandoned);
    }

    fn run(&mut self, op: impl FnOnce(&mut Self) -> Result<(), Skip>) -> Outcome {
        let result = if self.is_closed() {
            Err(Skip::SessionClosed)
        } else {
            op(self)
        };
        if let Err(skip) = &result {
            match skip {
                Skip::Media(_) => log::warn!("{}", skip),
                _ => log::debug!("Skipped: {}", skip),
            }
        }
        result.into()
    }

    fn apply_edit(&mut self, edit: &Edit) -> Result<(), Skip> {
        let next = edit.apply(&self.store, self.selection.selected(), &self.config)?;
        let previous = std::mem::replace(&mut self.store, next);
        self.history.commit(previous);
        self.install();
        Ok(())
    }

    fn step_back(&mut self) -> Result<(), Skip> {
        self.store = self
            .history
            .undo(self.store.clone())
            .ok_or(Skip::NothingToUndo)?;
        self.install();
        Ok(())
    }

    fn step_forward(&mut self) -> Result<(), Skip> {
        self.store = self
            .history
            .redo(self.store.clone())
            .ok_or(Skip::NothingToRedo)?;
        self.install();
        Ok(())
    }

    fn change_selection(&mut self, id: Option<ElementId>) -> Result<(), Skip> {
        if let Some(id) = id {
            if !self.store.contains(id) {
                return Err(Skip::UnknownElement(id));
            }
        }
        self.selection.set(id);
        self.view.redraw(&self.store, id);
        self.selection.rebind(&mut self.view);
        Ok(())
    }

    /// Make the current store visible and bring dependents in line with it.
    fn install(&mut self) {
        self.selection.prune(&self.store);
        self.view.redraw(&self.store, self.selection.selected());
        self.selection.rebind(&mut self.view);
        self.resources.reconcile(&self.store, &self.history);
        let resources = &self.resources;
        self.pending_videos.retain(|_, id| match id {
            Some(id) => resources.contains(*id),
            None => true,
        });
    }

    fn selected_video(&mut self) -> Result<&mut VideoResource, Skip> {
        let id = self.selection.selected().ok_or(Skip::NoSelection)?;
        let element = self.store.get(id).ok_or(Skip::UnknownElement(id))?;
        if element.kind() != ElementKind::Video {
            return Err(Skip::NotAVideo(id));
        }
        self.resources.get_mut(id).ok_or(Skip::MediaNotReady(id))
    }

    fn apply_media_event(&mut self, event: MediaEvent) -> Result<(), Skip> {
        match event {
            MediaEvent::ImageDecoded { load, result } => {
                if !self.pending_images.remove(&load) {
                    return Err(Skip::UnknownLoad(load));
                }
                let image = result?;
                if image.bitmap.aspect_ratio().is_none() {
                    return Err(MediaError::Decode(format!("image {} has zero height", load)).into());
                }
                self.apply_edit(&Edit::AddElement {
                    id: new_element_id(),
                    content: ElementContent::Image(image.bitmap),
                    position: self.config.spawn_position,
                })
            }
            MediaEvent::VideoDecoded { load, result } => {
                if self.pending_videos.get(&load) != Some(&None) {
                    return Err(Skip::UnknownLoad(load));
                }
                let video = match result {
                    Ok(video) => video,
                    Err(err) => {
                        self.pending_videos.remove(&load);
                        return Err(err.into());
                    }
                };
                let id = new_element_id();
                let sink = FrameSinkHandle::new(video.sink, self.config.video_frame_size);
                let added = self.apply_edit(&Edit::AddElement {
                    id,
                    content: ElementContent::Video(sink),
                    position: self.config.spawn_position,
                });
                if let Err(skip) = added {
                    self.pending_videos.remove(&load);
                    return Err(skip);
                }
                self.resources.insert(id, video.playback);
                self.pending_videos.insert(load, Some(id));
                Ok(())
            }
            MediaEvent::VideoReady { load } => {
                let id = match self.pending_videos.get(&load) {
                    Some(Some(id)) => *id,
                    _ => return Err(Skip::UnknownLoad(load)),
                };
                self.pending_videos.remove(&load);
                let resource = self.resources.get_mut(id).ok_or(Skip::UnknownElement(id))?;
                resource.mark_ready();
                if !self.store.contains(id) {
                    log::debug!("Video {} ready while off stage, not starting", id);
                    return Ok(());
                }
                if !resource.is_playing() {
                    resource.play()?;
                }
                log::info!("Video {} playing", id);
                Ok(())
            }
        }
    }
}
