//! Toolbar triggers and toolbar-only UI state.

use crate::elements::{ElementId, ElementKind};
use crate::store::ElementStore;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    AddText,
    AddImage,
    AddVideo,
    Undo,
    Redo,
    BringToFront,
    SendToBack,
    TogglePositionPanel,
    SnapTop,
    SnapBottom,
    SnapLeft,
    SnapRight,
    PlayPause,
    ForcePause,
    Stop,
}

impl Trigger {
    pub const ALL: [Trigger; 15] = [
        Trigger::AddText,
        Trigger::AddImage,
        Trigger::AddVideo,
        Trigger::Undo,
        Trigger::Redo,
        Trigger::BringToFront,
        Trigger::SendToBack,
        Trigger::TogglePositionPanel,
        Trigger::SnapTop,
        Trigger::SnapBottom,
        Trigger::SnapLeft,
        Trigger::SnapRight,
        Trigger::PlayPause,
        Trigger::ForcePause,
        Trigger::Stop,
    ];

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Trigger::AddText => "add-text",
            Trigger::AddImage => "add-image",
            Trigger::AddVideo => "add-video",
            Trigger::Undo => "undo",
            Trigger::Redo => "redo",
            Trigger::BringToFront => "bring-to-front",
            Trigger::SendToBack => "send-to-back",
            Trigger::TogglePositionPanel => "toggle-position-panel",
            Trigger::SnapTop => "snap-top",
            Trigger::SnapBottom => "snap-bottom",
            Trigger::SnapLeft => "snap-left",
            Trigger::SnapRight => "snap-right",
            Trigger::PlayPause => "play-pause",
            Trigger::ForcePause => "force-pause",
            Trigger::Stop => "stop",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Trigger::AddText => "Add a text element",
            Trigger::AddImage => "Add an image from a file",
            Trigger::AddVideo => "Add a video from a file",
            Trigger::Undo => "Undo",
            Trigger::Redo => "Redo",
            Trigger::BringToFront => "Bring selection to front",
            Trigger::SendToBack => "Send selection to back",
            Trigger::TogglePositionPanel => "Show or hide the position panel",
            Trigger::SnapTop => "Snap selection to top edge",
            Trigger::SnapBottom => "Snap selection to bottom edge",
            Trigger::SnapLeft => "Snap selection to left edge",
            Trigger::SnapRight => "Snap selection to right edge",
            Trigger::PlayPause => "Play or pause the selected video",
            Trigger::ForcePause => "Pause the selected video",
            Trigger::Stop => "Stop and rewind the selected video",
        }
    }

    /// Whether the trigger needs an argument (text or a media source).
    pub fn takes_input(self) -> bool {
        matches!(self, Trigger::AddText | Trigger::AddImage | Trigger::AddVideo)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized trigger name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown trigger: {0}")]
pub struct ParseTriggerError(pub String);

impl FromStr for Trigger {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trigger::ALL
            .into_iter()
            .find(|trigger| trigger.name() == s)
            .ok_or_else(|| ParseTriggerError(s.to_string()))
    }
}

/// Toolbar UI state. Never part of history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolbarState {
    pub position_panel_open: bool,
}

impl ToolbarState {
    pub fn toggle_position_panel(&mut self) {
        self.position_panel_open = !self.position_panel_open;
    }

    /// Video controls are shown only while a video is selected.
    pub fn video_controls_visible(store: &ElementStore, selected: Option<ElementId>) -> bool {
        selected
            .and_then(|id| store.get(id))
            .is_some_and(|element| element.kind() == ElementKind::Video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for trigger in Trigger::ALL {
            assert_eq!(trigger.name().parse::<Trigger>(), Ok(trigger));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "explode".parse::<Trigger>(),
            Err(ParseTriggerError("explode".to_string()))
        );
    }

    #[test]
    fn test_video_controls_follow_selection() {
        use crate::elements::{Element, FrameSinkHandle, MediaKey, TextElement, VideoElement, new_element_id};
        use kurbo::{Point, Size};

        let video = VideoElement::new(
            new_element_id(),
            FrameSinkHandle::new(MediaKey(1), Size::new(420.0, 280.0)),
            Point::ZERO,
        );
        let text = TextElement::new(new_element_id(), "Hi".to_string(), Point::ZERO, 20.0);
        let (video_id, text_id) = (video.id, text.id);
        let store = ElementStore::new()
            .append(Element::Video(video))
            .and_then(|s| s.append(Element::Text(text)))
            .unwrap();

        assert!(ToolbarState::video_controls_visible(&store, Some(video_id)));
        assert!(!ToolbarState::video_controls_visible(&store, Some(text_id)));
        assert!(!ToolbarState::video_controls_visible(&store, None));
    }

    #[test]
    fn test_toggle_position_panel() {
        let mut state = ToolbarState::default();
        state.toggle_position_panel();
        assert!(state.position_panel_open);
        state.toggle_position_panel();
        assert!(!state.position_panel_open);
    }
}
