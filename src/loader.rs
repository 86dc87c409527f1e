//! Loading and structural validation of machine descriptions.
//!
//! The loader is deliberately thin: it checks the shape of the description
//! (tuple arities, unique transition keys, move tokens, single-character
//! symbols) and materializes the immutable [`Machine`]. It does not verify
//! that referenced states belong to the declared state set, nor that
//! accepting states are reachable; those stay the description author's
//! responsibility.

use crate::description::{MachineDescription, TransitionEntry};
use crate::machine::{Machine, TransitionAction, TransitionKey};
use crate::types::{DescriptionError, Direction};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// `MachineLoader` turns serialized machine descriptions into [`Machine`]s,
/// from files or from string content.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a machine from a JSON description file.
    pub fn load_file(path: &Path) -> Result<Machine, DescriptionError> {
        let content = fs::read_to_string(path).map_err(|e| {
            DescriptionError::File(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::load_str(&content)
    }

    /// Loads a machine from JSON description content.
    pub fn load_str(content: &str) -> Result<Machine, DescriptionError> {
        materialize(&MachineDescription::from_json(content)?)
    }
}

/// Validates a description and builds the immutable transition table.
pub fn materialize(description: &MachineDescription) -> Result<Machine, DescriptionError> {
    if description.num_tapes == 0 {
        return Err(DescriptionError::InvalidTapeCount(description.num_tapes));
    }

    let blank = single_symbol(&description.blank)?;
    let mut table = HashMap::with_capacity(description.transitions.len());

    for entry in &description.transitions {
        let TransitionEntry(state, reads, next_state, writes, moves) = entry;

        if reads.len() != description.num_tapes
            || writes.len() != description.num_tapes
            || moves.len() != description.num_tapes
        {
            return Err(DescriptionError::ArityMismatch {
                state: state.clone(),
                expected: description.num_tapes,
                read: reads.len(),
                write: writes.len(),
                moves: moves.len(),
            });
        }

        let read = symbols(reads)?;
        let write = symbols(writes)?;
        let moves = moves
            .iter()
            .map(|token| {
                Direction::from_token(token)
                    .ok_or_else(|| DescriptionError::InvalidMove(token.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let key = TransitionKey {
            state: state.clone(),
            read,
        };

        if table.contains_key(&key) {
            return Err(DescriptionError::DuplicateTransition {
                state: key.state,
                read: key.read,
            });
        }

        table.insert(
            key,
            TransitionAction {
                next_state: next_state.clone(),
                write,
                moves,
            },
        );
    }

    Ok(Machine {
        states: description.states.iter().cloned().collect(),
        input_alphabet: alphabet(&description.input_alphabet)?,
        tape_alphabet: alphabet(&description.tape_alphabet)?,
        blank,
        initial_state: description.initial_state.clone(),
        accepting_states: description.accepting_states.iter().cloned().collect(),
        tape_count: description.num_tapes,
        step_cap: description.max_steps,
        table,
    })
}

fn single_symbol(s: &str) -> Result<char, DescriptionError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(DescriptionError::InvalidSymbol(s.to_string())),
    }
}

fn symbols(strings: &[String]) -> Result<Vec<char>, DescriptionError> {
    strings.iter().map(|s| single_symbol(s)).collect()
}

fn alphabet(strings: &[String]) -> Result<std::collections::HashSet<char>, DescriptionError> {
    strings.iter().map(|s| single_symbol(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn description_json(transitions: &str) -> String {
        format!(
            r#"{{
                "Q": ["start", "done"],
                "Sigma": ["a", "b"],
                "Gamma": ["_", "a", "b"],
                "blank": "_",
                "q0": "start",
                "F": ["done"],
                "num_tapes": 1,
                "max_steps": 100,
                "transitions": {transitions}
            }}"#
        )
    }

    #[test]
    fn test_load_valid_description() {
        let json = description_json(r#"[["start", ["a"], "done", ["b"], ["R"]]]"#);
        let machine = MachineLoader::load_str(&json).unwrap();

        assert_eq!(machine.initial_state(), "start");
        assert_eq!(machine.blank(), '_');
        assert_eq!(machine.tape_count(), 1);
        assert_eq!(machine.step_cap(), 100);
        assert_eq!(machine.transition_count(), 1);
        assert!(machine.is_accepting("done"));

        let action = machine.lookup("start", &['a']).unwrap();
        assert_eq!(action.next_state, "done");
        assert_eq!(action.moves, vec![Direction::Right]);
    }

    #[test]
    fn test_duplicate_transition_key_fails() {
        let json = description_json(
            r#"[
                ["start", ["a"], "done", ["b"], ["R"]],
                ["start", ["a"], "start", ["a"], ["S"]]
            ]"#,
        );

        let result = MachineLoader::load_str(&json);
        match result {
            Err(DescriptionError::DuplicateTransition { state, read }) => {
                assert_eq!(state, "start");
                assert_eq!(read, vec!['a']);
            }
            other => panic!("expected DuplicateTransition, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_tuple_length_mismatch_fails() {
        // Two read symbols on a one-tape machine.
        let json = description_json(r#"[["start", ["a", "b"], "done", ["b"], ["R"]]]"#);

        let result = MachineLoader::load_str(&json);
        match result {
            Err(DescriptionError::ArityMismatch {
                state,
                expected,
                read,
                ..
            }) => {
                assert_eq!(state, "start");
                assert_eq!(expected, 1);
                assert_eq!(read, 2);
            }
            other => panic!("expected ArityMismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_short_transition_entry_fails() {
        let json = description_json(r#"[["start", ["a"], "done", ["b"]]]"#);
        let result = MachineLoader::load_str(&json);
        assert!(matches!(result, Err(DescriptionError::Parse(_))));
    }

    #[test]
    fn test_invalid_move_token_fails() {
        let json = description_json(r#"[["start", ["a"], "done", ["b"], ["X"]]]"#);
        let result = MachineLoader::load_str(&json);
        match result {
            Err(DescriptionError::InvalidMove(token)) => assert_eq!(token, "X"),
            other => panic!("expected InvalidMove, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_multi_character_symbol_fails() {
        let json = description_json(r#"[["start", ["ab"], "done", ["b"], ["R"]]]"#);
        let result = MachineLoader::load_str(&json);
        match result {
            Err(DescriptionError::InvalidSymbol(symbol)) => assert_eq!(symbol, "ab"),
            other => panic!("expected InvalidSymbol, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_zero_tapes_fails() {
        let json = r#"{
            "Q": ["start"],
            "Sigma": [],
            "Gamma": ["_"],
            "blank": "_",
            "q0": "start",
            "F": [],
            "num_tapes": 0,
            "max_steps": 10,
            "transitions": []
        }"#;

        let result = MachineLoader::load_str(json);
        assert!(matches!(result, Err(DescriptionError::InvalidTapeCount(0))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("machine.json");

        let json = description_json(r#"[["start", ["a"], "done", ["b"], ["R"]]]"#);
        let mut file = File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let machine = MachineLoader::load_file(&path).unwrap();
        assert_eq!(machine.initial_state(), "start");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let result = MachineLoader::load_file(&path);
        assert!(matches!(result, Err(DescriptionError::File(_))));
    }

    #[test]
    fn test_state_membership_is_not_checked() {
        // Transitions referencing states outside Q still load; the loader is
        // a structural validator only.
        let json = description_json(r#"[["elsewhere", ["a"], "nowhere", ["b"], ["R"]]]"#);
        let machine = MachineLoader::load_str(&json).unwrap();
        assert!(machine.lookup("elsewhere", &['a']).is_some());
    }
}
