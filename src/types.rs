//! Core types shared across the simulator: head movements, terminal run
//! outcomes, execution snapshots, and the error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single head movement, one per tape per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Keep the head where it is.
    Stay,
}

impl Direction {
    /// Parses a move token from a serialized description (`"L"`, `"R"`, `"S"`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "L" => Some(Self::Left),
            "R" => Some(Self::Right),
            "S" => Some(Self::Stay),
            _ => None,
        }
    }

    /// The serialized move token for this direction.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Right => "R",
            Self::Stay => "S",
        }
    }
}

/// Terminal outcome of a run.
///
/// A halted machine is in exactly one of these conditions. Acceptance is
/// decided by accepting-state membership, then budget exhaustion; anything
/// else halted because no transition was defined for the current
/// configuration, which is the model's native way of rejecting an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The machine halted in an accepting state.
    Accepted,
    /// No transition was defined for the final `(state, read-tuple)` pair.
    Rejected {
        /// State the machine was in when it halted.
        state: String,
        /// The symbols under the heads at that point.
        symbols: Vec<char>,
    },
    /// The step ceiling was reached before the machine halted on its own.
    BudgetExhausted,
}

/// A read-only view of execution state between steps.
///
/// Capturing one has no effect on execution; consumers use it for tracing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Steps executed so far.
    pub step_count: usize,
    /// Current state identifier.
    pub state: String,
    /// Head offset into each tape's current window.
    pub heads: Vec<usize>,
    /// The full window of each tape, untrimmed.
    pub tapes: Vec<String>,
}

/// Errors surfaced while loading a machine description.
///
/// All of these are fatal to the load attempt; nothing is coerced or patched.
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// The serialized form could not be deserialized (including transition
    /// entries whose arity is not exactly 5).
    #[error("malformed machine description: {0}")]
    Parse(#[from] serde_json::Error),
    /// The description file could not be read or written.
    #[error("file error: {0}")]
    File(String),
    /// A transition's read/write/move tuples do not all match `num_tapes`.
    #[error(
        "transition in state {state} has tuple lengths read={read}, write={write}, \
         moves={moves}, expected {expected}"
    )]
    ArityMismatch {
        state: String,
        expected: usize,
        read: usize,
        write: usize,
        moves: usize,
    },
    /// Two transitions share the same `(state, read-tuple)` key.
    #[error("duplicate transition for state {state} reading {read:?}")]
    DuplicateTransition { state: String, read: Vec<char> },
    /// A move token outside `L`/`R`/`S`.
    #[error("invalid move token: {0:?}")]
    InvalidMove(String),
    /// A symbol that is not exactly one character.
    #[error("invalid symbol: {0:?} (symbols are single characters)")]
    InvalidSymbol(String),
    /// `num_tapes` must be a positive integer.
    #[error("invalid tape count: {0}")]
    InvalidTapeCount(usize),
}

/// Errors surfaced by the engine's operational surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// More seed words were supplied to `reset` than the machine has tapes.
    #[error("{seeds} seed words supplied for {tapes} tapes")]
    SeedCountMismatch { seeds: usize, tapes: usize },
    /// A tape index outside `0..tape_count`.
    #[error("tape index {index} out of bounds (machine has {tapes} tapes)")]
    TapeIndexOutOfBounds { index: usize, tapes: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tokens_round_trip() {
        for direction in [Direction::Left, Direction::Right, Direction::Stay] {
            assert_eq!(Direction::from_token(direction.token()), Some(direction));
        }
        assert_eq!(Direction::from_token("X"), None);
        assert_eq!(Direction::from_token("l"), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let rejected = Outcome::Rejected {
            state: "q0".to_string(),
            symbols: vec!['z'],
        };

        let json = serde_json::to_string(&rejected).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(rejected, back);
    }

    #[test]
    fn test_error_display() {
        let error = ConfigurationError::SeedCountMismatch { seeds: 3, tapes: 1 };
        let msg = format!("{}", error);
        assert!(msg.contains("3 seed words"));
        assert!(msg.contains("1 tapes"));

        let error = DescriptionError::InvalidMove("X".to_string());
        assert!(format!("{}", error).contains("invalid move token"));
    }
}
