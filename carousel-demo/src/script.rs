//! Command scripts for headless runs.
//!
//! A script is a comma-separated list of `frame:command` steps, for example
//! `10:next,40:reverse,60:select=3`. Steps run just before the frame with the
//! given number is ticked.
//!
//! | Command            | Effect                                |
//! |--------------------|---------------------------------------|
//! | `next`, `previous` | Step the selection                    |
//! | `select=K`         | Animated selection of slot K          |
//! | `jump=K`           | Immediate selection of slot K         |
//! | `rotate`, `stop`   | Enable or disable auto-rotation       |
//! | `reverse`          | Flip the rotation direction           |
//! | `pause`            | Hold or release auto-rotation         |
//! | `open`             | Grow the ring from the centre         |
//! | `orientation`      | Swap horizontal and vertical layout   |
//! | `preset=NAME`      | Load `linear`, `elastic` or `bouncy`  |
//! | `resize=WxH`       | Change the container size             |

use carousel_core::{Command, Preset};
use thiserror::Error;

/// Errors from parsing a command script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// A step is not of the form `frame:command`.
    #[error("Malformed step '{0}': expected FRAME:COMMAND")]
    MalformedStep(String),

    /// The frame number did not parse.
    #[error("Invalid frame number in step '{0}'")]
    InvalidFrame(String),

    /// The command name is not known.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// The command argument did not parse.
    #[error("Invalid argument for '{command}': {reason}")]
    InvalidArgument {
        /// Command name.
        command: String,
        /// What was wrong.
        reason: String,
    },
}

/// One scripted command and the frame it runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    /// Frame number the command runs before.
    pub frame: u64,
    /// Command to apply.
    pub command: Command,
}

/// Parse a script into steps ordered by frame.
///
/// Steps on the same frame keep their written order. An empty script yields
/// no steps.
///
/// # Errors
///
/// Returns the first [`ScriptError`] encountered.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_step)
        .collect::<Result<Vec<_>, _>>()?;
    steps.sort_by_key(|step| step.frame);
    Ok(steps)
}

fn parse_step(step: &str) -> Result<ScriptStep, ScriptError> {
    let (frame, command) = step
        .split_once(':')
        .ok_or_else(|| ScriptError::MalformedStep(step.to_string()))?;
    let frame = frame
        .trim()
        .parse()
        .map_err(|_| ScriptError::InvalidFrame(step.to_string()))?;
    Ok(ScriptStep {
        frame,
        command: parse_command(command.trim())?,
    })
}

fn parse_command(text: &str) -> Result<Command, ScriptError> {
    let (name, arg) = match text.split_once('=') {
        Some((name, arg)) => (name.trim(), Some(arg.trim())),
        None => (text, None),
    };

    let command = match (name, arg) {
        ("next", None) => Command::Next,
        ("previous" | "prev", None) => Command::Previous,
        ("rotate", None) => Command::EnableRotation { enabled: true },
        ("stop", None) => Command::EnableRotation { enabled: false },
        ("reverse", None) => Command::ReverseRotation,
        ("pause", None) => Command::TogglePause,
        ("open", None) => Command::Open,
        ("orientation", None) => Command::ToggleOrientation,
        ("select", Some(arg)) => Command::Select {
            slot: parse_slot(name, arg)?,
            animate: true,
        },
        ("jump", Some(arg)) => Command::Select {
            slot: parse_slot(name, arg)?,
            animate: false,
        },
        ("preset", Some(arg)) => Command::ApplyPreset {
            preset: arg.parse::<Preset>().map_err(|e| invalid(name, e))?,
        },
        ("resize", Some(arg)) => {
            let (width, height) = arg
                .split_once('x')
                .ok_or_else(|| invalid(name, "expected WIDTHxHEIGHT"))?;
            Command::Resize {
                width: width.trim().parse().map_err(|e| invalid(name, e))?,
                height: height.trim().parse().map_err(|e| invalid(name, e))?,
            }
        }
        (
            "next" | "previous" | "prev" | "rotate" | "stop" | "reverse" | "pause" | "open"
            | "orientation",
            Some(_),
        ) => return Err(invalid(name, "takes no argument")),
        ("select" | "jump" | "preset" | "resize", None) => {
            return Err(invalid(name, "missing argument"))
        }
        _ => return Err(ScriptError::UnknownCommand(name.to_string())),
    };
    Ok(command)
}

fn parse_slot(name: &str, arg: &str) -> Result<usize, ScriptError> {
    arg.parse().map_err(|e| invalid(name, e))
}

fn invalid(command: &str, reason: impl ToString) -> ScriptError {
    ScriptError::InvalidArgument {
        command: command.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_script() {
        assert!(parse_script("").expect("empty is fine").is_empty());
        assert!(parse_script(" , ").expect("blank steps skipped").is_empty());
    }

    #[test]
    fn test_parse_mixed_script() {
        let steps = parse_script("10:next, 40:reverse,60:select=3,70:preset=bouncy,80:resize=1024x768")
            .expect("valid script");
        let commands: Vec<_> = steps.iter().map(|s| (s.frame, s.command.clone())).collect();
        assert_eq!(
            commands,
            vec![
                (10, Command::Next),
                (40, Command::ReverseRotation),
                (
                    60,
                    Command::Select {
                        slot: 3,
                        animate: true
                    }
                ),
                (
                    70,
                    Command::ApplyPreset {
                        preset: Preset::Bouncy
                    }
                ),
                (
                    80,
                    Command::Resize {
                        width: 1024.0,
                        height: 768.0
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_steps_sorted_by_frame_stably() {
        let steps = parse_script("50:open,5:rotate,50:orientation,5:jump=2").expect("valid");
        let frames: Vec<_> = steps.iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![5, 5, 50, 50]);
        assert_eq!(steps[0].command, Command::EnableRotation { enabled: true });
        assert_eq!(
            steps[1].command,
            Command::Select {
                slot: 2,
                animate: false
            }
        );
        assert_eq!(steps[2].command, Command::Open);
        assert_eq!(steps[3].command, Command::ToggleOrientation);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_script("next"),
            Err(ScriptError::MalformedStep("next".to_string()))
        );
        assert_eq!(
            parse_script("x:next"),
            Err(ScriptError::InvalidFrame("x:next".to_string()))
        );
        assert_eq!(
            parse_script("1:spin"),
            Err(ScriptError::UnknownCommand("spin".to_string()))
        );
        assert!(matches!(
            parse_script("1:select=two"),
            Err(ScriptError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_script("1:select"),
            Err(ScriptError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_script("1:next=2"),
            Err(ScriptError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_script("1:resize=800"),
            Err(ScriptError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_script("1:preset=wobbly"),
            Err(ScriptError::InvalidArgument { .. })
        ));
    }
}
