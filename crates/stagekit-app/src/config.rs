//! Shell configuration from environment variables.

use kurbo::Size;
use stagekit_core::EditorConfig;
use stagekit_core::config::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

/// Shell configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub editor: EditorConfig,
    /// Print the final scene as JSON on stdout.
    pub print_scene: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            print_scene: true,
        }
    }
}

impl AppConfig {
    /// Read `STAGEKIT_*` variables, falling back to defaults for anything
    /// missing or unparsable.
    pub fn from_env() -> Self {
        let canvas = Size::new(
            env_parse("STAGEKIT_CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH),
            env_parse("STAGEKIT_CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT),
        );
        let editor = EditorConfig::default()
            .with_canvas_size(canvas)
            .with_history_limit(env_opt("STAGEKIT_HISTORY_LIMIT"));
        Self {
            editor,
            print_scene: env_parse("STAGEKIT_PRINT_SCENE", true),
        }
    }
}

fn env_opt<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    env_opt(key).unwrap_or(default)
}
