//! Intent scripts: one intent per line.
//!
//! ```text
//! # comment
//! place diesel-generator 0 0
//! move power-wire-2 0 1
//! rotate power-wire-2
//! remove power-wire-2
//! viewport 1920 1080 60
//! ```

use std::str::FromStr;

use dcgrid_core::id::{InstanceId, ModuleId, ParseInstanceIdError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Place {
        template: ModuleId,
        row: i32,
        col: i32,
    },
    Move {
        id: InstanceId,
        row: i32,
        col: i32,
    },
    Remove {
        id: InstanceId,
    },
    Rotate {
        id: InstanceId,
    },
    /// Grow the canvas to cover a window of `width` x `height` pixels.
    Viewport {
        width: u32,
        height: u32,
        cell: u32,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown intent `{verb}`")]
    UnknownIntent { line: usize, verb: String },

    #[error("line {line}: `{verb}` takes {expected} argument(s), got {got}")]
    Arity {
        line: usize,
        verb: String,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: `{value}` is not a grid coordinate")]
    Coordinate { line: usize, value: String },

    #[error("line {line}: `{value}` is not a pixel size")]
    Pixels { line: usize, value: String },

    #[error("line {line}: {source}")]
    Instance {
        line: usize,
        #[source]
        source: ParseInstanceIdError,
    },
}

fn coordinate(line: usize, value: &str) -> Result<i32, ScriptError> {
    value.parse().map_err(|_| ScriptError::Coordinate {
        line,
        value: value.to_string(),
    })
}

fn pixels(line: usize, value: &str) -> Result<u32, ScriptError> {
    value.parse().map_err(|_| ScriptError::Pixels {
        line,
        value: value.to_string(),
    })
}

fn instance(line: usize, value: &str) -> Result<InstanceId, ScriptError> {
    InstanceId::from_str(value).map_err(|source| ScriptError::Instance { line, source })
}

/// Parse one non-empty script line. `line` is 1-based and only used in
/// errors.
pub fn parse_line(line: usize, text: &str) -> Result<Intent, ScriptError> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Err(ScriptError::UnknownIntent {
            line,
            verb: String::new(),
        });
    };
    let arity = |expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ScriptError::Arity {
                line,
                verb: verb.to_string(),
                expected,
                got: args.len(),
            })
        }
    };

    match verb {
        "place" => {
            arity(3)?;
            Ok(Intent::Place {
                template: ModuleId::new(args[0]),
                row: coordinate(line, args[1])?,
                col: coordinate(line, args[2])?,
            })
        }
        "move" => {
            arity(3)?;
            Ok(Intent::Move {
                id: instance(line, args[0])?,
                row: coordinate(line, args[1])?,
                col: coordinate(line, args[2])?,
            })
        }
        "remove" => {
            arity(1)?;
            Ok(Intent::Remove {
                id: instance(line, args[0])?,
            })
        }
        "rotate" => {
            arity(1)?;
            Ok(Intent::Rotate {
                id: instance(line, args[0])?,
            })
        }
        "viewport" => {
            arity(3)?;
            Ok(Intent::Viewport {
                width: pixels(line, args[0])?,
                height: pixels(line, args[1])?,
                cell: pixels(line, args[2])?,
            })
        }
        _ => Err(ScriptError::UnknownIntent {
            line,
            verb: verb.to_string(),
        }),
    }
}

/// Parse a whole script, skipping blank lines and `#` comments.
pub fn parse(text: &str) -> Result<Vec<(usize, Intent)>, ScriptError> {
    text.lines()
        .enumerate()
        .map(|(i, raw)| (i + 1, raw.split('#').next().unwrap_or("").trim()))
        .filter(|(_, body)| !body.is_empty())
        .map(|(line, body)| parse_line(line, body).map(|intent| (line, intent)))
        .collect()
}
