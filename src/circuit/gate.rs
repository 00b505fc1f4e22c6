//! Comparator gate
//!
//! A `GateUnit` models one comparator fed by a container holding a fixed
//! signal strength. In compare mode the back input passes only when it is at
//! least as strong as the side input; in subtract mode the side input is
//! subtracted from the back input, flooring at zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HlpError, Result};

/// A signal strength in `0..=SIGNAL_MAX`.
pub type Signal = u8;

/// Highest representable signal strength.
pub const SIGNAL_MAX: Signal = 15;

/// Number of distinct signal strengths.
pub const SIGNAL_LEVELS: usize = SIGNAL_MAX as usize + 1;

/// Which of the two gates of a layer an edit addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateSlot {
    Side,
    Back,
}

impl fmt::Display for GateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateSlot::Side => write!(f, "side"),
            GateSlot::Back => write!(f, "back"),
        }
    }
}

impl FromStr for GateSlot {
    type Err = HlpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "side" | "s" => Ok(GateSlot::Side),
            "back" | "b" => Ok(GateSlot::Back),
            other => Err(HlpError::InvalidCommand {
                input: other.to_string(),
                reason: "gate slot must be 'side' or 'back'".to_string(),
            }),
        }
    }
}

/// Step direction for [`GateUnit::bump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Signed step (+1 / -1)
    pub fn step(self) -> i8 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

impl FromStr for Direction {
    type Err = HlpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" | "+1" | "up" => Ok(Direction::Up),
            "-" | "-1" | "down" => Ok(Direction::Down),
            other => Err(HlpError::InvalidCommand {
                input: other.to_string(),
                reason: "direction must be '+' or '-'".to_string(),
            }),
        }
    }
}

/// A single configurable comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GateFields")]
pub struct GateUnit {
    reference: Signal,
    subtract_mode: bool,
}

/// Unvalidated serde form of a gate
#[derive(Deserialize)]
struct GateFields {
    reference: Signal,
    #[serde(default)]
    subtract_mode: bool,
}

impl TryFrom<GateFields> for GateUnit {
    type Error = HlpError;

    fn try_from(fields: GateFields) -> Result<Self> {
        GateUnit::new(fields.reference, fields.subtract_mode)
    }
}

impl GateUnit {
    /// Create a gate, rejecting references above [`SIGNAL_MAX`]
    pub fn new(reference: Signal, subtract_mode: bool) -> Result<Self> {
        if reference > SIGNAL_MAX {
            return Err(HlpError::InvalidReference {
                value: reference as u32,
            });
        }
        Ok(Self {
            reference,
            subtract_mode,
        })
    }

    pub fn reference(&self) -> Signal {
        self.reference
    }

    pub fn subtract_mode(&self) -> bool {
        self.subtract_mode
    }

    /// Step the reference by one, wrapping 15 -> 0 and 0 -> 15
    pub fn bump(&mut self, direction: Direction) {
        let levels = SIGNAL_LEVELS as i16;
        let next = (self.reference as i16 + direction.step() as i16).rem_euclid(levels);
        self.reference = next as Signal;
    }

    /// Flip between compare and subtract mode
    pub fn toggle_mode(&mut self) {
        self.subtract_mode = !self.subtract_mode;
    }

    /// Evaluate the comparator for the given side and back inputs.
    ///
    /// The reference value is not consulted here; [`Layer`](super::Layer)
    /// decides which argument the reference is wired into.
    pub fn apply(&self, side: Signal, back: Signal) -> Signal {
        if self.subtract_mode {
            back.saturating_sub(side)
        } else if back >= side {
            back
        } else {
            0
        }
    }
}
