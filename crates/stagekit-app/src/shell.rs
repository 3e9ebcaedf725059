//! Script-driven editor shell.

use crate::media::{SimulatedPlayback, decode_image, probe_video};
use crate::script::{ScriptError, ScriptLine};
use stagekit_core::{
    DecodedVideo, EditorConfig, EditorSession, Edit, ElementId, HeadlessView, ImageLoad, MediaKey,
    Outcome, Skip, Trigger, VideoLoad,
};
use std::path::PathBuf;

/// A decode the shell has started but not yet completed.
enum PendingDecode {
    Image { ticket: ImageLoad, path: PathBuf },
    Video { ticket: VideoLoad, path: PathBuf },
}

/// Runs script lines against an editor session.
///
/// Media decodes are held back until a `wait` line (or the end of the
/// script), so commands issued in between interleave with them the way they
/// would with a real decoder.
pub struct Shell {
    session: EditorSession<HeadlessView>,
    decodes: Vec<PendingDecode>,
    next_key: u64,
}

impl Shell {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            session: EditorSession::with_config(HeadlessView::new(), config),
            decodes: Vec::new(),
            next_key: 0,
        }
    }

    pub fn session(&self) -> &EditorSession<HeadlessView> {
        &self.session
    }

    /// Run every line of a script. Failing lines are logged and skipped.
    /// Returns the number of lines that failed.
    pub fn run_script(&mut self, source: &str) -> usize {
        let mut failed = 0;
        for (number, line) in source.lines().enumerate() {
            let result = ScriptLine::parse(line).and_then(|parsed| match parsed {
                Some(parsed) => self.execute(parsed).map(Some),
                None => Ok(None),
            });
            match result {
                Ok(Some(Outcome::Skipped(skip))) => {
                    log::info!("line {}: skipped ({})", number + 1, skip);
                }
                Ok(_) => {}
                Err(err) => {
                    log::error!("line {}: {}", number + 1, err);
                    failed += 1;
                }
            }
        }
        failed
    }

    /// Execute one parsed line.
    pub fn execute(&mut self, line: ScriptLine) -> Result<Outcome, ScriptError> {
        let outcome = match line {
            ScriptLine::Trigger(Trigger::AddText, Some(text)) => self.session.add_text(&text),
            ScriptLine::Trigger(Trigger::AddImage, Some(source)) => self.start_image(source),
            ScriptLine::Trigger(Trigger::AddVideo, Some(source)) => self.start_video(source),
            ScriptLine::Trigger(trigger, _) => self.session.fire(trigger),
            ScriptLine::Select(index) => {
                let id = self.element_at(index)?;
                self.session.select(Some(id))
            }
            ScriptLine::Deselect => self.session.select(None),
            ScriptLine::Drag { index, x, y } => {
                let id = self.element_at(index)?;
                let position = kurbo::Point::new(x, y);
                self.session
                    .dispatch(Edit::MoveElement { id, position }.into())
            }
            ScriptLine::Scale { index, sx, sy } => {
                let id = self.element_at(index)?;
                match self.session.view().scaled_geometry(id, sx, sy) {
                    Some(geometry) => self
                        .session
                        .dispatch(Edit::TransformElement { id, geometry }.into()),
                    None => Outcome::Skipped(Skip::UnknownElement(id)),
                }
            }
            ScriptLine::Remove => match self.session.selected() {
                Some(id) => self.session.dispatch(Edit::RemoveElement { id }.into()),
                None => Outcome::Skipped(Skip::NoSelection),
            },
            ScriptLine::Wait => {
                let outcomes = self.flush();
                outcomes
                    .into_iter()
                    .find(|outcome| !outcome.is_applied())
                    .unwrap_or(Outcome::Applied)
            }
            ScriptLine::Show => {
                self.show();
                Outcome::Applied
            }
            ScriptLine::Help => {
                print_help();
                Outcome::Applied
            }
        };
        Ok(outcome)
    }

    /// Complete every outstanding decode and apply the results.
    pub fn flush(&mut self) -> Vec<Outcome> {
        for decode in std::mem::take(&mut self.decodes) {
            match decode {
                PendingDecode::Image { ticket, path } => {
                    let key = self.next_media_key();
                    ticket.resolve(decode_image(&path, key));
                }
                PendingDecode::Video { ticket, path } => {
                    let result = probe_video(&path).map(|()| {
                        let label = path.display().to_string();
                        DecodedVideo::new(self.next_media_key(), Box::new(SimulatedPlayback::new(label)))
                    });
                    let decoded = result.is_ok();
                    ticket.decoded(result);
                    if decoded {
                        ticket.ready();
                    }
                }
            }
        }
        self.session.pump()
    }

    /// Finish the script: complete outstanding decodes, serialize the scene
    /// and close the session.
    pub fn finish(mut self) -> Result<String, serde_json::Error> {
        self.flush();
        let scene = self.session.store().to_json();
        self.session.shutdown();
        scene
    }

    fn start_image(&mut self, source: String) -> Outcome {
        match self.session.begin_image_load(&source) {
            Some(ticket) => {
                self.decodes.push(PendingDecode::Image {
                    ticket,
                    path: PathBuf::from(source),
                });
                Outcome::Applied
            }
            None => Outcome::Skipped(Skip::SessionClosed),
        }
    }

    fn start_video(&mut self, source: String) -> Outcome {
        match self.session.begin_video_load(&source) {
            Some(ticket) => {
                self.decodes.push(PendingDecode::Video {
                    ticket,
                    path: PathBuf::from(source),
                });
                Outcome::Applied
            }
            None => Outcome::Skipped(Skip::SessionClosed),
        }
    }

    fn element_at(&self, index: usize) -> Result<ElementId, ScriptError> {
        self.session
            .store()
            .elements()
            .get(index)
            .map(|element| element.id())
            .ok_or(ScriptError::NoSuchElement(index))
    }

    fn next_media_key(&mut self) -> MediaKey {
        self.next_key += 1;
        MediaKey(self.next_key)
    }

    fn show(&self) {
        let selected = self.session.selected();
        for (index, element) in self.session.store().elements().iter().enumerate() {
            let marker = if Some(element.id()) == selected { "*" } else { " " };
            let position = element.position();
            log::info!(
                "{}{} {:?} at ({}, {})",
                marker,
                index,
                element.kind(),
                position.x,
                position.y
            );
        }
        log::info!(
            "undo: {}, redo: {}, position panel: {}",
            self.session.history().undo_depth(),
            self.session.history().redo_depth(),
            if self.session.toolbar().position_panel_open { "open" } else { "closed" }
        );
    }
}

/// Print every trigger and shell verb.
fn print_help() {
    println!("\n=== Toolbar ===");
    for trigger in Trigger::ALL {
        println!("  {:24} {}", trigger.name(), trigger.description());
    }
    println!("\n=== Gestures ===");
    println!("  {:24} Click the element at an index", "select <i>");
    println!("  {:24} Click the background", "deselect");
    println!("  {:24} Drag an element", "drag <i> <x> <y>");
    println!("  {:24} Resize an element", "scale <i> <sx> <sy>");
    println!("  {:24} Delete the selection", "remove");
    println!("  {:24} Complete pending media loads", "wait");
    println!("  {:24} Log the scene", "show");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagekit_core::ElementKind;

    fn shell() -> Shell {
        Shell::new(EditorConfig::default())
    }

    #[test]
    fn test_reorder_script() {
        let mut shell = shell();
        let failed = shell.run_script(
            "add-text A\nadd-text B\nadd-text C\nselect 1\nbring-to-front\n",
        );
        assert_eq!(failed, 0);
        let labels: Vec<String> = shell
            .session()
            .store()
            .elements()
            .iter()
            .map(|element| match element {
                stagekit_core::Element::Text(text) => text.content.clone(),
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(labels, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_bad_lines_are_counted_and_skipped() {
        let mut shell = shell();
        let failed = shell.run_script("frobnicate\nadd-text ok\nselect 9\n");
        assert_eq!(failed, 2);
        assert_eq!(shell.session().store().len(), 1);
    }

    #[test]
    fn test_image_waits_for_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        image::RgbImage::new(4, 2).save(&path).unwrap();

        let mut shell = shell();
        let script = format!("add-text first\nadd-image {}\nundo\n", path.display());
        assert_eq!(shell.run_script(&script), 0);
        assert!(shell.session().store().is_empty());

        assert!(shell.execute(ScriptLine::Wait).unwrap().is_applied());
        let store = shell.session().store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.elements()[0].kind(), ElementKind::Image);
        assert_eq!(store.elements()[0].size().map(|s| s.width), Some(400.0));
    }

    #[test]
    fn test_video_plays_after_wait() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.webm");
        std::fs::write(&path, b"").unwrap();

        let mut shell = shell();
        shell.run_script(&format!("add-video {}\nwait\nselect 0\n", path.display()));
        let id = shell.session().store().elements()[0].id();
        assert!(shell.session().is_playing(id));
        assert!(shell.session().video_controls_visible());

        shell.run_script("play-pause\n");
        assert!(!shell.session().is_playing(id));
    }

    #[test]
    fn test_missing_media_reports_skip() {
        let mut shell = shell();
        shell.run_script("add-image /nonexistent/stagekit.png\n");
        let outcome = shell.execute(ScriptLine::Wait).unwrap();
        assert!(matches!(outcome, Outcome::Skipped(Skip::Media(_))));
        assert!(shell.session().store().is_empty());
    }

    #[test]
    fn test_gestures() {
        let mut shell = shell();
        shell.run_script("add-text Hi\nselect 0\ndrag 0 30 40\nsnap-bottom\n");
        let element = &shell.session().store().elements()[0];
        assert_eq!(element.position(), kurbo::Point::new(30.0, 570.0));

        shell.run_script("remove\n");
        assert!(shell.session().store().is_empty());
        assert_eq!(shell.session().selected(), None);
    }

    #[test]
    fn test_finish_serializes_scene() {
        let mut shell = shell();
        shell.run_script("add-text Hello\n");
        let scene = shell.finish().unwrap();
        assert!(scene.contains("Hello"));
    }
}
