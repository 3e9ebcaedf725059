//! Completion queue between media collaborators and the session.

use super::{DecodedImage, DecodedVideo};
use crate::error::MediaResult;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Queue = RefCell<VecDeque<MediaEvent>>;

/// Identifies one media load for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(u64);

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A completion waiting to be applied.
#[derive(Debug)]
pub enum MediaEvent {
    ImageDecoded {
        load: LoadId,
        result: MediaResult<DecodedImage>,
    },
    VideoDecoded {
        load: LoadId,
        result: MediaResult<DecodedVideo>,
    },
    VideoReady {
        load: LoadId,
    },
}

/// Session-owned end of the completion queue.
///
/// Tickets only hold a weak reference, so once the inbox is dropped every
/// outstanding ticket resolves into nothing.
#[derive(Debug, Default)]
pub struct MediaInbox {
    queue: Rc<Queue>,
    next_load: u64,
}

impl MediaInbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> LoadId {
        self.next_load += 1;
        LoadId(self.next_load)
    }

    /// Issue a ticket for an image decode.
    pub fn image_ticket(&mut self) -> ImageLoad {
        ImageLoad {
            id: self.next_id(),
            queue: Rc::downgrade(&self.queue),
        }
    }

    /// Issue a ticket for a video decode.
    pub fn video_ticket(&mut self) -> VideoLoad {
        VideoLoad {
            id: self.next_id(),
            queue: Rc::downgrade(&self.queue),
        }
    }

    /// Take every queued completion in arrival order.
    pub fn drain(&self) -> Vec<MediaEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

fn deliver(queue: &Weak<Queue>, event: MediaEvent) -> bool {
    match queue.upgrade() {
        Some(queue) => {
            queue.borrow_mut().push_back(event);
            true
        }
        None => {
            log::debug!("Dropping media completion for closed session: {:?}", event);
            false
        }
    }
}

/// One-shot ticket for an image decode.
#[derive(Debug)]
pub struct ImageLoad {
    id: LoadId,
    queue: Weak<Queue>,
}

impl ImageLoad {
    pub fn id(&self) -> LoadId {
        self.id
    }

    /// Report the decode result. Returns `false` if the session is gone.
    pub fn resolve(self, result: MediaResult<DecodedImage>) -> bool {
        deliver(&self.queue, MediaEvent::ImageDecoded {
            load: self.id,
            result,
        })
    }
}

/// Ticket for a video decode, reporting both decode and ready-to-play.
#[derive(Debug, Clone)]
pub struct VideoLoad {
    id: LoadId,
    queue: Weak<Queue>,
}

impl VideoLoad {
    pub fn id(&self) -> LoadId {
        self.id
    }

    /// Report that the frame sink exists (or that decoding failed).
    pub fn decoded(&self, result: MediaResult<DecodedVideo>) -> bool {
        deliver(&self.queue, MediaEvent::VideoDecoded {
            load: self.id,
            result,
        })
    }

    /// Report that enough data is buffered to start playback.
    pub fn ready(&self) -> bool {
        deliver(&self.queue, MediaEvent::VideoReady { load: self.id })
    }
}
