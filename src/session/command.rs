//! Edit commands
//!
//! The discrete edits a front end may request, plus their one-line text form:
//!
//! ```text
//! insert N
//! remove N
//! bump N side|back +|-
//! toggle N side|back
//! load TEXT
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::circuit::{Direction, GateSlot};
use crate::error::{HlpError, Result};

/// A single requested edit of the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    /// Insert a default layer after the given layer
    InsertLayerAfter { layer: usize },
    /// Remove the layer following the given layer
    RemoveLayerAfter { layer: usize },
    BumpGate {
        layer: usize,
        slot: GateSlot,
        direction: Direction,
    },
    ToggleGate { layer: usize, slot: GateSlot },
    /// Replace the whole chain with decoded text
    LoadFromText { text: String },
}

impl EditCommand {
    /// Whether the command changes the number of layers
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            EditCommand::InsertLayerAfter { .. }
                | EditCommand::RemoveLayerAfter { .. }
                | EditCommand::LoadFromText { .. }
        )
    }
}

impl fmt::Display for EditCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditCommand::InsertLayerAfter { layer } => write!(f, "insert {}", layer),
            EditCommand::RemoveLayerAfter { layer } => write!(f, "remove {}", layer),
            EditCommand::BumpGate {
                layer,
                slot,
                direction,
            } => {
                let sign = match direction {
                    Direction::Up => '+',
                    Direction::Down => '-',
                };
                write!(f, "bump {} {} {}", layer, slot, sign)
            }
            EditCommand::ToggleGate { layer, slot } => write!(f, "toggle {} {}", layer, slot),
            EditCommand::LoadFromText { text } => write!(f, "load {}", text),
        }
    }
}

impl FromStr for EditCommand {
    type Err = HlpError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_start();
        let (verb, rest) = match line.char_indices().find(|(_, c)| c.is_whitespace()) {
            Some((pos, separator)) => (&line[..pos], &line[pos + separator.len_utf8()..]),
            None => (line, ""),
        };

        // load text is kept verbatim after the single separator
        if verb.eq_ignore_ascii_case("load") {
            return Ok(EditCommand::LoadFromText {
                text: rest.to_string(),
            });
        }

        let line = line.trim_end();

        let args: Vec<&str> = rest.split_whitespace().collect();
        let invalid = |reason: &str| HlpError::InvalidCommand {
            input: line.to_string(),
            reason: reason.to_string(),
        };

        match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("insert", [layer]) => Ok(EditCommand::InsertLayerAfter {
                layer: parse_index(layer, line)?,
            }),
            ("remove", [layer]) => Ok(EditCommand::RemoveLayerAfter {
                layer: parse_index(layer, line)?,
            }),
            ("bump", [layer, slot, direction]) => Ok(EditCommand::BumpGate {
                layer: parse_index(layer, line)?,
                slot: slot.parse()?,
                direction: direction.parse()?,
            }),
            ("toggle", [layer, slot]) => Ok(EditCommand::ToggleGate {
                layer: parse_index(layer, line)?,
                slot: slot.parse()?,
            }),
            ("insert" | "remove", _) => Err(invalid("expected one layer index")),
            ("bump", _) => Err(invalid("expected: bump N side|back +|-")),
            ("toggle", _) => Err(invalid("expected: toggle N side|back")),
            _ => Err(invalid("unknown command")),
        }
    }
}

fn parse_index(value: &str, line: &str) -> Result<usize> {
    value.parse().map_err(|_| HlpError::InvalidCommand {
        input: line.to_string(),
        reason: format!("'{}' is not a layer index", value),
    })
}
