//! Playback resources owned per video element.

use super::{FrameLoop, VideoPlayback};
use crate::elements::ElementId;
use crate::error::MediaResult;
use crate::history::History;
use crate::store::ElementStore;
use std::collections::HashMap;

/// Playback state and frame loop for one video element.
pub struct VideoResource {
    playback: Box<dyn VideoPlayback>,
    frames: Option<FrameLoop>,
    ready: bool,
    playing: bool,
}

impl VideoResource {
    pub fn new(playback: Box<dyn VideoPlayback>) -> Self {
        Self {
            playback,
            frames: None,
            ready: false,
            playing: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn has_frame_loop(&self) -> bool {
        self.frames.is_some()
    }

    /// Record that content is available. A video already playing gets its
    /// frame loop now.
    pub fn mark_ready(&mut self) {
        self.ready = true;
        if self.playing {
            self.start_frames();
        }
    }

    /// Start playback. The frame loop starts once the video is ready.
    pub fn play(&mut self) -> MediaResult<()> {
        self.playback.play()?;
        self.playing = true;
        if self.ready {
            self.start_frames();
        }
        Ok(())
    }

    fn start_frames(&mut self) {
        if self.frames.is_none() {
            self.frames = Some(FrameLoop::new(self.playback.start_frames()));
        }
    }

    /// Pause playback and stop the frame loop.
    pub fn pause(&mut self) {
        self.playback.pause();
        self.playing = false;
        self.frames = None;
    }

    /// Pause and rewind to the first frame.
    pub fn stop(&mut self) {
        self.pause();
        self.playback.seek_to_start();
    }

    fn suspend(&mut self) {
        if self.playing || self.frames.is_some() {
            self.pause();
        }
    }
}

/// Video resources keyed by the element that owns them.
#[derive(Default)]
pub struct ResourceTable {
    videos: HashMap<ElementId, VideoResource>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ElementId, playback: Box<dyn VideoPlayback>) {
        if self.videos.insert(id, VideoResource::new(playback)).is_some() {
            log::warn!("Replaced existing playback resource for {}", id);
        }
    }

    pub fn get(&self, id: ElementId) -> Option<&VideoResource> {
        self.videos.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut VideoResource> {
        self.videos.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.videos.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Match resources to element presence.
    ///
    /// Resources of elements in `live` are untouched. Elements that only a
    /// history snapshot still references are paused so undo/redo can bring
    /// them back. Everything else is released.
    pub fn reconcile(&mut self, live: &ElementStore, history: &History) {
        self.videos.retain(|id, resource| {
            if live.contains(*id) {
                return true;
            }
            if history.snapshots().any(|snapshot| snapshot.contains(*id)) {
                resource.suspend();
                return true;
            }
            log::debug!("Releasing playback resource for {}", id);
            false
        });
    }

    /// Drop every resource, stopping all frame loops.
    pub fn release_all(&mut self) {
        for (_, mut resource) in self.videos.drain() {
            resource.suspend();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Element, FrameSinkHandle, MediaKey, VideoElement, new_element_id};
    use crate::media::testing::fake_playback;
    use kurbo::{Point, Size};

    fn video_store() -> (ElementStore, ElementId) {
        let sink = FrameSinkHandle::new(MediaKey(3), Size::new(420.0, 280.0));
        let video = VideoElement::new(new_element_id(), sink, Point::ZERO);
        let id = video.id;
        (ElementStore::new().append(Element::Video(video)).unwrap(), id)
    }

    #[test]
    fn test_play_pause_controls_frame_loop() {
        let (playback, log) = fake_playback();
        let mut resource = VideoResource::new(playback);
        resource.mark_ready();
        resource.play().unwrap();
        assert!(resource.is_playing());
        assert_eq!(log.borrow().running_loops(), 1);

        resource.stop();
        assert!(!resource.is_playing());
        assert_eq!(log.borrow().running_loops(), 0);
        assert_eq!(log.borrow().seeks, 1);
    }

    #[test]
    fn test_frame_loop_waits_for_ready() {
        let (playback, log) = fake_playback();
        let mut resource = VideoResource::new(playback);
        resource.play().unwrap();
        assert!(resource.is_playing());
        assert!(!resource.has_frame_loop());
        assert_eq!(log.borrow().frame_loops_started, 0);

        resource.mark_ready();
        assert!(resource.has_frame_loop());
        assert_eq!(log.borrow().running_loops(), 1);
    }

    #[test]
    fn test_ready_while_paused_starts_nothing() {
        let (playback, log) = fake_playback();
        let mut resource = VideoResource::new(playback);
        resource.mark_ready();
        assert!(!resource.has_frame_loop());
        assert_eq!(log.borrow().frame_loops_started, 0);
    }

    #[test]
    fn test_rejected_play_starts_nothing() {
        let (playback, log) = fake_playback();
        log.borrow_mut().reject_play = true;
        let mut resource = VideoResource::new(playback);
        assert!(resource.play().is_err());
        assert!(!resource.is_playing());
        assert!(!resource.has_frame_loop());
    }

    #[test]
    fn test_reconcile_suspends_then_releases() {
        let (store, id) = video_store();
        let (playback, log) = fake_playback();
        let mut table = ResourceTable::new();
        table.insert(id, playback);
        table.get_mut(id).unwrap().mark_ready();
        table.get_mut(id).unwrap().play().unwrap();

        let mut history = History::new();
        table.reconcile(&store, &history);
        assert!(table.get(id).unwrap().is_playing());

        // Undone: only history remembers the element.
        history.commit(ElementStore::new());
        history.undo(store.clone()).unwrap();
        table.reconcile(&ElementStore::new(), &history);
        assert!(table.contains(id));
        assert!(!table.get(id).unwrap().is_playing());
        assert_eq!(log.borrow().running_loops(), 0);

        history.clear();
        table.reconcile(&ElementStore::new(), &history);
        assert!(table.is_empty());
    }

    #[test]
    fn test_release_all_stops_loops() {
        let (_, id) = video_store();
        let (playback, log) = fake_playback();
        let mut table = ResourceTable::new();
        table.insert(id, playback);
        table.get_mut(id).unwrap().mark_ready();
        table.get_mut(id).unwrap().play().unwrap();
        table.release_all();
        assert!(table.is_empty());
        assert_eq!(log.borrow().running_loops(), 0);
    }
}
