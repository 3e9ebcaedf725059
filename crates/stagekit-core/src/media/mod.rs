//! Media collaborator interface.
//!
//! Decoding happens outside the core. A collaborator receives a load ticket,
//! decodes on its own schedule and resolves the ticket; the session applies
//! the completion the next time it is pumped.

mod inbox;
mod resources;

pub use inbox::{ImageLoad, LoadId, MediaEvent, MediaInbox, VideoLoad};
pub use resources::{ResourceTable, VideoResource};

use crate::elements::{BitmapHandle, MediaKey};
use crate::error::MediaResult;
use kurbo::Size;

/// A finished image decode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedImage {
    pub bitmap: BitmapHandle,
}

impl DecodedImage {
    pub fn new(key: MediaKey, natural_width: f64, natural_height: f64) -> Self {
        Self {
            bitmap: BitmapHandle::new(key, Size::new(natural_width, natural_height)),
        }
    }
}

/// A video whose frame sink exists. Playback may not be ready yet.
pub struct DecodedVideo {
    pub sink: MediaKey,
    pub playback: Box<dyn VideoPlayback>,
}

impl DecodedVideo {
    pub fn new(sink: MediaKey, playback: Box<dyn VideoPlayback>) -> Self {
        Self { sink, playback }
    }
}

impl std::fmt::Debug for DecodedVideo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedVideo")
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

/// Playback controls for one video.
pub trait VideoPlayback {
    /// Start or resume playback. May be refused by an autoplay policy.
    fn play(&mut self) -> MediaResult<()>;

    fn pause(&mut self);

    fn seek_to_start(&mut self);

    /// Begin pushing frames into the sink until the returned driver is stopped.
    fn start_frames(&mut self) -> Box<dyn FrameDriver>;
}

/// A recurring frame callback.
pub trait FrameDriver {
    fn stop(&mut self);
}

/// Owns a running [`FrameDriver`] and stops it when dropped.
pub struct FrameLoop {
    driver: Box<dyn FrameDriver>,
}

impl FrameLoop {
    pub fn new(driver: Box<dyn FrameDriver>) -> Self {
        Self { driver }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.driver.stop();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted playback doubles shared by tests.

    use super::*;
    use crate::error::MediaError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// What a [`FakePlayback`] has been asked to do.
    #[derive(Debug, Default)]
    pub struct PlaybackLog {
        pub plays: usize,
        pub pauses: usize,
        pub seeks: usize,
        pub frame_loops_started: usize,
        pub frame_loops_stopped: usize,
        pub reject_play: bool,
    }

    impl PlaybackLog {
        pub fn running_loops(&self) -> usize {
            self.frame_loops_started - self.frame_loops_stopped
        }
    }

    pub struct FakePlayback {
        pub log: Rc<RefCell<PlaybackLog>>,
    }

    struct FakeDriver {
        log: Rc<RefCell<PlaybackLog>>,
        stopped: bool,
    }

    impl FrameDriver for FakeDriver {
        fn stop(&mut self) {
            if !self.stopped {
                self.stopped = true;
                self.log.borrow_mut().frame_loops_stopped += 1;
            }
        }
    }

    impl VideoPlayback for FakePlayback {
        fn play(&mut self) -> MediaResult<()> {
            let mut log = self.log.borrow_mut();
            if log.reject_play {
                return Err(MediaError::AutoplayRejected("user gesture required".to_string()));
            }
            log.plays += 1;
            Ok(())
        }

        fn pause(&mut self) {
            self.log.borrow_mut().pauses += 1;
        }

        fn seek_to_start(&mut self) {
            self.log.borrow_mut().seeks += 1;
        }

        fn start_frames(&mut self) -> Box<dyn FrameDriver> {
            self.log.borrow_mut().frame_loops_started += 1;
            Box::new(FakeDriver {
                log: self.log.clone(),
                stopped: false,
            })
        }
    }

    pub fn fake_playback() -> (Box<dyn VideoPlayback>, Rc<RefCell<PlaybackLog>>) {
        let log = Rc::new(RefCell::new(PlaybackLog::default()));
        (Box::new(FakePlayback { log: log.clone() }), log)
    }
}
