//! Script line parsing.

use stagekit_core::Trigger;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors from reading or parsing a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("No element at index {0}")]
    NoSuchElement(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptLine {
    /// A toolbar trigger with its text or media source, if it takes one.
    Trigger(Trigger, Option<String>),
    /// Click on the element at a z-order index.
    Select(usize),
    /// Click on the empty background.
    Deselect,
    /// Drag the element at an index to a new position.
    Drag { index: usize, x: f64, y: f64 },
    /// Resize the element at an index by scale factors.
    Scale { index: usize, sx: f64, sy: f64 },
    /// Delete the selected element.
    Remove,
    /// Let outstanding media decodes complete.
    Wait,
    /// Log the current scene.
    Show,
    /// Print available commands.
    Help,
}

impl ScriptLine {
    /// Parse a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ScriptError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();

        let parsed = match command {
            "select" => ScriptLine::Select(index(command, args.next())?),
            "deselect" => ScriptLine::Deselect,
            "drag" => ScriptLine::Drag {
                index: index(command, args.next())?,
                x: number(command, args.next())?,
                y: number(command, args.next())?,
            },
            "scale" => ScriptLine::Scale {
                index: index(command, args.next())?,
                sx: number(command, args.next())?,
                sy: number(command, args.next())?,
            },
            "remove" => ScriptLine::Remove,
            "wait" => ScriptLine::Wait,
            "show" => ScriptLine::Show,
            "help" => ScriptLine::Help,
            _ => {
                let trigger: Trigger = command
                    .parse()
                    .map_err(|_| ScriptError::UnknownCommand(command.to_string()))?;
                let input = if trigger.takes_input() {
                    if rest.is_empty() {
                        return Err(ScriptError::MissingArgument {
                            command: command.to_string(),
                            expected: "text or a file path",
                        });
                    }
                    Some(rest.to_string())
                } else {
                    None
                };
                ScriptLine::Trigger(trigger, input)
            }
        };
        Ok(Some(parsed))
    }
}

fn index(command: &str, arg: Option<&str>) -> Result<usize, ScriptError> {
    let arg = arg.ok_or_else(|| ScriptError::MissingArgument {
        command: command.to_string(),
        expected: "an element index",
    })?;
    arg.parse()
        .map_err(|_| ScriptError::InvalidNumber(arg.to_string()))
}

fn number(command: &str, arg: Option<&str>) -> Result<f64, ScriptError> {
    let arg = arg.ok_or_else(|| ScriptError::MissingArgument {
        command: command.to_string(),
        expected: "a number",
    })?;
    arg.parse()
        .map_err(|_| ScriptError::InvalidNumber(arg.to_string()))
}

/// Read a script from a file, or from stdin when no path is given.
pub fn read_script(path: Option<&Path>) -> Result<String, ScriptError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triggers() {
        assert_eq!(
            ScriptLine::parse("undo").unwrap(),
            Some(ScriptLine::Trigger(Trigger::Undo, None))
        );
        assert_eq!(
            ScriptLine::parse("  add-text Hello world  ").unwrap(),
            Some(ScriptLine::Trigger(
                Trigger::AddText,
                Some("Hello world".to_string())
            ))
        );
        assert_eq!(
            ScriptLine::parse("snap-right").unwrap(),
            Some(ScriptLine::Trigger(Trigger::SnapRight, None))
        );
    }

    #[test]
    fn test_parse_gestures() {
        assert_eq!(ScriptLine::parse("select 2").unwrap(), Some(ScriptLine::Select(2)));
        assert_eq!(
            ScriptLine::parse("drag 0 10 -5.5").unwrap(),
            Some(ScriptLine::Drag {
                index: 0,
                x: 10.0,
                y: -5.5
            })
        );
        assert_eq!(
            ScriptLine::parse("scale 1 2 0.5").unwrap(),
            Some(ScriptLine::Scale {
                index: 1,
                sx: 2.0,
                sy: 0.5
            })
        );
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(ScriptLine::parse("").unwrap(), None);
        assert_eq!(ScriptLine::parse("   # note").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ScriptLine::parse("explode"),
            Err(ScriptError::UnknownCommand(_))
        ));
        assert!(matches!(
            ScriptLine::parse("add-image"),
            Err(ScriptError::MissingArgument { .. })
        ));
        assert!(matches!(
            ScriptLine::parse("select first"),
            Err(ScriptError::InvalidNumber(_))
        ));
        assert!(matches!(
            ScriptLine::parse("drag 0 10"),
            Err(ScriptError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_read_script_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.txt");
        std::fs::write(&path, "add-text Hi\nundo\n").unwrap();
        assert_eq!(read_script(Some(&path)).unwrap(), "add-text Hi\nundo\n");
    }
}
