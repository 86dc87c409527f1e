//! Task-level API over the generated cipher machines: encode or decode a
//! message against a key without touching descriptions or engines directly.
//!
//! The generated machines are built once per direction and cached; callers
//! share them as `Arc<Machine>` while every call runs its own engine.

use crate::compiler::{self, Mode, ALPHABET, SEPARATOR};
use crate::engine::Engine;
use crate::loader::materialize;
use crate::machine::Machine;
use crate::types::{ConfigurationError, DescriptionError, Outcome, Snapshot};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use thiserror::Error;

lazy_static! {
    static ref MACHINES: RwLock<HashMap<Mode, Arc<Machine>>> = RwLock::new(HashMap::new());
}

/// Errors surfaced by the cipher surface.
#[derive(Debug, Error)]
pub enum CipherError {
    /// A key outside 0..=26 / A..=Z.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
    /// The generated description failed to load. Does not happen for the
    /// built-in machines; kept for parity with caller-supplied descriptions.
    #[error(transparent)]
    Description(#[from] DescriptionError),
    /// The engine refused the seed configuration.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The machine halted on a symbol it has no transition for, typically a
    /// character outside the message alphabet.
    #[error("input rejected in state {state} reading {symbols:?}")]
    Rejected { state: String, symbols: Vec<char> },
    /// The step ceiling was reached before acceptance.
    #[error("step budget exhausted before the machine halted")]
    BudgetExhausted,
}

/// A cipher key: a numeric shift in 0..=26, or a letter standing for its
/// zero-based alphabet position (A=0 .. Z=25).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Numeric shift.
    Shift(u8),
    /// Letter key.
    Letter(char),
}

impl Key {
    /// A numeric key, validated against the alphabet size.
    pub fn shift(value: u8) -> Result<Self, CipherError> {
        if usize::from(value) <= ALPHABET.len() {
            Ok(Self::Shift(value))
        } else {
            Err(CipherError::InvalidKey(value.to_string()))
        }
    }

    /// A letter key, validated against the alphabet.
    pub fn letter(letter: char) -> Result<Self, CipherError> {
        if ALPHABET.contains(letter) {
            Ok(Self::Letter(letter))
        } else {
            Err(CipherError::InvalidKey(letter.to_string()))
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shift(value) => write!(f, "{value}"),
            Self::Letter(letter) => write!(f, "{letter}"),
        }
    }
}

impl FromStr for Key {
    type Err = CipherError;

    /// Parses the literal key text as it would appear on the tape: one or
    /// two decimal digits, or a single uppercase letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() {
            let value: u8 = s
                .parse()
                .map_err(|_| CipherError::InvalidKey(s.to_string()))?;
            return Self::shift(value);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::letter(letter),
            _ => Err(CipherError::InvalidKey(s.to_string())),
        }
    }
}

/// Encodes `message` with `key`: every letter rotates forward by the key,
/// spaces and periods are copied unchanged.
pub fn encode(key: Key, message: &str) -> Result<String, CipherError> {
    transform(Mode::Encode, key, message)
}

/// Decodes `message` with `key`: the inverse rotation of [`encode`].
pub fn decode(key: Key, message: &str) -> Result<String, CipherError> {
    transform(Mode::Decode, key, message)
}

/// Like [`encode`], also returning the per-step snapshots of the run.
pub fn encode_with_trace(
    key: Key,
    message: &str,
) -> Result<(String, Vec<Snapshot>), CipherError> {
    transform_with_trace(Mode::Encode, key, message)
}

/// Like [`decode`], also returning the per-step snapshots of the run.
pub fn decode_with_trace(
    key: Key,
    message: &str,
) -> Result<(String, Vec<Snapshot>), CipherError> {
    transform_with_trace(Mode::Decode, key, message)
}

/// The cached machine for `mode`, built on first use.
pub fn machine(mode: Mode) -> Result<Arc<Machine>, CipherError> {
    if let Ok(cache) = MACHINES.read() {
        if let Some(machine) = cache.get(&mode) {
            return Ok(Arc::clone(machine));
        }
    }

    let built = Arc::new(materialize(&compiler::build(mode))?);
    if let Ok(mut cache) = MACHINES.write() {
        // Whoever populated the entry first wins; everyone shares it.
        return Ok(Arc::clone(cache.entry(mode).or_insert(built)));
    }

    Ok(built)
}

fn transform(mode: Mode, key: Key, message: &str) -> Result<String, CipherError> {
    let mut engine = Engine::new(machine(mode)?);
    engine.reset(&[seed(key, message)])?;

    let outcome = engine.run();
    finish(outcome, &engine)
}

fn transform_with_trace(
    mode: Mode,
    key: Key,
    message: &str,
) -> Result<(String, Vec<Snapshot>), CipherError> {
    let mut engine = Engine::new(machine(mode)?);
    engine.reset(&[seed(key, message)])?;

    let mut trace = vec![engine.snapshot()];
    while engine.step() {
        trace.push(engine.snapshot());
    }

    let outcome = engine.run();
    Ok((finish(outcome, &engine)?, trace))
}

fn seed(key: Key, message: &str) -> String {
    format!("{key}{SEPARATOR}{message}")
}

fn finish(outcome: Outcome, engine: &Engine) -> Result<String, CipherError> {
    match outcome {
        Outcome::Accepted => {
            let tape = engine.read_tape(0, true)?;
            Ok(strip_key(&tape))
        }
        Outcome::Rejected { state, symbols } => Err(CipherError::Rejected { state, symbols }),
        Outcome::BudgetExhausted => Err(CipherError::BudgetExhausted),
    }
}

// The machine leaves the key and separator on the tape; the caller-facing
// result is the message portion.
fn strip_key(tape: &str) -> String {
    match tape.split_once(SEPARATOR) {
        Some((_, message)) => message.to_string(),
        None => tape.to_string(),
    }
}
