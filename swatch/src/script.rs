//! # Replay scripts
//!
//! Stand-in for a real host's event loop. One command per line, blank lines and lines starting with `#` are skipped:
//!
//! ```text
//! # Select the top-left swatch.
//! press 10 10
//! move 20 20
//! release 20 20
//! resize 200 100
//! set #FF00FF00
//! draw snapshot.png
//! ```

use swatch_core::{color::ColorParseError, Color, PointerEvent, PointerPhase};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Pointer(PointerEvent),
    Resize { width: f32, height: f32 },
    Set(Color),
    /// Snapshot the palette into a PNG at this path.
    Draw(std::path::PathBuf),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScriptErrorKind {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("expected {expected} argument(s), found {found}")]
    Arity { expected: usize, found: usize },
    #[error(transparent)]
    Number(#[from] std::num::ParseFloatError),
    #[error(transparent)]
    Color(#[from] ColorParseError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}: {kind}")]
pub struct ScriptError {
    /// One-based, as editors count them.
    pub line: usize,
    #[source]
    pub kind: ScriptErrorKind,
}

pub fn parse(text: &str) -> Result<Vec<Command>, ScriptError> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            parse_line(line)
                .map_err(|kind| ScriptError {
                    line: idx + 1,
                    kind,
                })
                .transpose()
        })
        .collect()
}

fn parse_line(line: &str) -> Result<Option<Command>, ScriptErrorKind> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();
    let expect = |expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ScriptErrorKind::Arity {
                expected,
                found: args.len(),
            })
        }
    };

    let phase = match name {
        "press" => PointerPhase::Press,
        "move" => PointerPhase::Move,
        "release" => PointerPhase::Release,
        "cancel" => PointerPhase::Cancel,
        "hover" => PointerPhase::Hover,
        "resize" => {
            expect(2)?;
            return Ok(Some(Command::Resize {
                width: args[0].parse()?,
                height: args[1].parse()?,
            }));
        }
        "set" => {
            expect(1)?;
            return Ok(Some(Command::Set(args[0].parse()?)));
        }
        "draw" => {
            // Keep the whole remainder, paths may have spaces.
            if rest.is_empty() {
                return Err(ScriptErrorKind::Arity {
                    expected: 1,
                    found: 0,
                });
            }
            return Ok(Some(Command::Draw(rest.into())));
        }
        other => return Err(ScriptErrorKind::UnknownCommand(other.to_owned())),
    };
    expect(2)?;
    Ok(Some(Command::Pointer(PointerEvent::new(
        phase,
        args[0].parse()?,
        args[1].parse()?,
    ))))
}

#[cfg(test)]
mod test {
    use super::{parse, Command, ScriptError, ScriptErrorKind};
    use swatch_core::{color::ColorParseError, Color, PointerEvent, PointerPhase};

    #[test]
    fn full_script() {
        let script = "
            # comment
            press 10 10
            move 20.5 -3

            release 20 20
            cancel 0 0
            hover 1 2
            resize 200 100
            set #FF00FF
            draw out dir/snap shot.png
        ";
        assert_eq!(
            parse(script).unwrap(),
            [
                Command::Pointer(PointerEvent::press(10.0, 10.0)),
                Command::Pointer(PointerEvent::moved(20.5, -3.0)),
                Command::Pointer(PointerEvent::release(20.0, 20.0)),
                Command::Pointer(PointerEvent::new(PointerPhase::Cancel, 0.0, 0.0)),
                Command::Pointer(PointerEvent::new(PointerPhase::Hover, 1.0, 2.0)),
                Command::Resize {
                    width: 200.0,
                    height: 100.0
                },
                Command::Set(Color::from_rgb(0xFF00FF)),
                Command::Draw("out dir/snap shot.png".into()),
            ]
        );
    }
    #[test]
    fn errors_name_the_line() {
        let err = parse("press 1 1\n\njump 1 1").unwrap_err();
        assert_eq!(
            err,
            ScriptError {
                line: 3,
                kind: ScriptErrorKind::UnknownCommand("jump".into()),
            }
        );
        assert_eq!(err.to_string(), "line 3: unknown command `jump`");

        assert_eq!(
            parse("release 1").unwrap_err().kind,
            ScriptErrorKind::Arity {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            parse("draw").unwrap_err().kind,
            ScriptErrorKind::Arity {
                expected: 1,
                found: 0
            }
        );
        assert!(matches!(
            parse("move x 1").unwrap_err().kind,
            ScriptErrorKind::Number(_)
        ));
        assert_eq!(
            parse("set #12").unwrap_err().kind,
            ScriptErrorKind::Color(ColorParseError::Length(2))
        );
    }
}
