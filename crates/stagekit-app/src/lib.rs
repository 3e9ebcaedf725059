//! StageKit Application
//!
//! A headless shell around the editor core: toolbar triggers and pointer
//! gestures are read as script lines, media is decoded from disk, and the
//! resulting scene is printed as JSON.

mod config;
mod media;
mod script;
mod shell;

pub use config::AppConfig;
pub use media::{SimulatedPlayback, decode_image, probe_video};
pub use script::{ScriptError, ScriptLine, read_script};
pub use shell::Shell;
