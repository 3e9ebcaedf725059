//! Media collaborators for the headless shell.
//!
//! Images are probed with the `image` crate. Videos are not decoded: a file
//! with a known container extension gets a simulated playback that logs
//! what a real player would do.

use stagekit_core::{DecodedImage, FrameDriver, MediaError, MediaKey, MediaResult, VideoPlayback};
use std::path::Path;

const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "webm", "mov", "ogg"];

/// Read an image's natural size.
pub fn decode_image(path: &Path, key: MediaKey) -> MediaResult<DecodedImage> {
    let (width, height) =
        image::image_dimensions(path).map_err(|e| MediaError::Decode(e.to_string()))?;
    log::debug!("Decoded {} ({}x{})", path.display(), width, height);
    Ok(DecodedImage::new(key, width as f64, height as f64))
}

/// Check that a video file exists and has a playable container extension.
pub fn probe_video(path: &Path) -> MediaResult<()> {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(MediaError::Unsupported(path.display().to_string()));
    }
    std::fs::metadata(path).map_err(|e| MediaError::Decode(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

/// Playback that tracks state and logs instead of presenting frames.
#[derive(Debug)]
pub struct SimulatedPlayback {
    label: String,
}

impl SimulatedPlayback {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl VideoPlayback for SimulatedPlayback {
    fn play(&mut self) -> MediaResult<()> {
        log::info!("{}: play", self.label);
        Ok(())
    }

    fn pause(&mut self) {
        log::info!("{}: pause", self.label);
    }

    fn seek_to_start(&mut self) {
        log::info!("{}: seek to 0", self.label);
    }

    fn start_frames(&mut self) -> Box<dyn FrameDriver> {
        log::debug!("{}: frame loop started", self.label);
        Box::new(SimulatedFrames {
            label: self.label.clone(),
        })
    }
}

struct SimulatedFrames {
    label: String,
}

impl FrameDriver for SimulatedFrames {
    fn stop(&mut self) {
        log::debug!("{}: frame loop stopped", self.label);
    }
}
