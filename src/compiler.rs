//! Construction of the keyed shift-cipher machines.
//!
//! The machine model has no registers, so "remember a key 0..=26 while
//! scanning the message" is realized by an indexed family of states: one
//! awaiting-separator state and one processing state per key value, with the
//! per-letter rewrite table baked into each processing state's transitions at
//! build time. The engine never computes a shift; it only follows
//! precomputed symbol rewrites.
//!
//! Input convention for the generated machines: `KEY#MESSAGE`, where KEY is
//! one or two decimal digits in 0..=26 or a single uppercase letter (A=0),
//! and MESSAGE consists of uppercase letters, spaces, and periods.

use crate::description::{MachineDescription, TransitionEntry};
use crate::types::Direction;

/// Cipher direction: encoding adds the key modulo the alphabet size,
/// decoding subtracts it. Everything else about the two machines is
/// identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Rotate letters forward by the key.
    Encode,
    /// Rotate letters backward by the key.
    Decode,
}

/// The cipher alphabet, in key order (A=0 .. Z=25).
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Separator between the key and the message.
pub const SEPARATOR: char = '#';
/// Blank symbol of the generated machines.
pub const BLANK: char = '_';
/// Non-alphabetic message symbols copied unchanged.
const PASS_THROUGH: [char; 2] = [' ', '.'];
/// Step ceiling of the generated machines.
const STEP_CAP: usize = 500_000;

const INITIAL: &str = "q0";
const ACCEPT: &str = "qAccept";

fn two_digit_state(lead: usize) -> String {
    format!("qTwo_{lead}")
}

/// Key is known; the machine still has to consume the separator.
fn sep_state(key: usize) -> String {
    format!("qSep_{key}")
}

/// Key is known and the separator consumed; letters get rewritten here.
fn shift_state(key: usize) -> String {
    format!("qShift_{key}")
}

fn shift_letter(letters: &[char], index: usize, key: usize, mode: Mode) -> char {
    let len = letters.len();
    let rotated = match mode {
        Mode::Encode => (index + key % len) % len,
        Mode::Decode => (index + len - key % len) % len,
    };
    letters[rotated]
}

fn rule(state: &str, read: char, next: &str, write: char, mv: Direction) -> TransitionEntry {
    TransitionEntry(
        state.to_string(),
        vec![read.to_string()],
        next.to_string(),
        vec![write.to_string()],
        vec![mv.token().to_string()],
    )
}

/// Builds the complete single-tape cipher machine for `mode`.
///
/// The state family is generated from the alphabet size, so the construction
/// stays parametric in it: keys run over `0..=ALPHABET.len()`, with the full
/// rotation being the identity.
pub fn build(mode: Mode) -> MachineDescription {
    let letters: Vec<char> = ALPHABET.chars().collect();
    let max_key = letters.len();

    let mut states = vec![
        INITIAL.to_string(),
        two_digit_state(1),
        two_digit_state(2),
        ACCEPT.to_string(),
    ];
    for key in 0..=max_key {
        states.push(sep_state(key));
        states.push(shift_state(key));
    }

    let mut transitions = Vec::new();

    // A leading digit that cannot start a two-digit key is the whole key.
    // '1' and '2' are ambiguous and route through a dedicated state.
    for (d, digit) in ('0'..='9').enumerate() {
        let next = if d == 1 || d == 2 {
            two_digit_state(d)
        } else {
            sep_state(d)
        };
        transitions.push(rule(INITIAL, digit, &next, digit, Direction::Right));
    }

    // A leading letter is itself the key, by alphabet position.
    for (index, &letter) in letters.iter().enumerate() {
        transitions.push(rule(INITIAL, letter, &sep_state(index), letter, Direction::Right));
    }

    // The separator commits to the one-digit key (and is consumed right into
    // processing); a second digit commits to the two-digit key, but only
    // while the value stays within the alphabet size. Digits that would push
    // past it get no transition at all, which rejects the input.
    for lead in [1, 2] {
        let state = two_digit_state(lead);
        transitions.push(rule(
            &state,
            SEPARATOR,
            &shift_state(lead),
            SEPARATOR,
            Direction::Right,
        ));
        for (d, digit) in ('0'..='9').enumerate() {
            let key = lead * 10 + d;
            if key <= max_key {
                transitions.push(rule(&state, digit, &sep_state(key), digit, Direction::Right));
            }
        }
    }

    // Awaiting separator, key fully known.
    for key in 0..=max_key {
        transitions.push(rule(
            &sep_state(key),
            SEPARATOR,
            &shift_state(key),
            SEPARATOR,
            Direction::Right,
        ));
    }

    // Processing: rewrite letters, copy everything else, accept on blank
    // without advancing.
    for key in 0..=max_key {
        let state = shift_state(key);
        for (index, &letter) in letters.iter().enumerate() {
            let rewritten = shift_letter(&letters, index, key, mode);
            transitions.push(rule(&state, letter, &state, rewritten, Direction::Right));
        }
        for symbol in PASS_THROUGH {
            transitions.push(rule(&state, symbol, &state, symbol, Direction::Right));
        }
        for digit in '0'..='9' {
            transitions.push(rule(&state, digit, &state, digit, Direction::Right));
        }
        // A separator recurring inside the message is copied as-is.
        transitions.push(rule(&state, SEPARATOR, &state, SEPARATOR, Direction::Right));
        transitions.push(rule(&state, BLANK, ACCEPT, BLANK, Direction::Stay));
    }

    let mut input_alphabet: Vec<String> =
        vec![" ".to_string(), SEPARATOR.to_string(), ".".to_string()];
    input_alphabet.extend(letters.iter().map(|c| c.to_string()));
    input_alphabet.extend(('0'..='9').map(|c| c.to_string()));

    let mut tape_alphabet = vec![BLANK.to_string()];
    tape_alphabet.extend(input_alphabet.iter().cloned());

    MachineDescription {
        states,
        input_alphabet,
        tape_alphabet,
        blank: BLANK.to_string(),
        initial_state: INITIAL.to_string(),
        accepting_states: vec![ACCEPT.to_string()],
        num_tapes: 1,
        max_steps: STEP_CAP,
        transitions,
    }
}
