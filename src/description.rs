//! The declarative, serialized form of a machine: the JSON document consumed
//! by the loader and produced by the cipher compiler (or written by hand).

use crate::types::DescriptionError;
use serde::{Deserialize, Serialize};

/// One serialized transition:
/// `[state, [read_1..read_k], next_state, [write_1..write_k], [move_1..move_k]]`.
///
/// Deserializing through a 5-field tuple struct makes any other arity a parse
/// error rather than something to patch up later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry(
    /// Source state.
    pub String,
    /// Symbols read, one per tape.
    pub Vec<String>,
    /// Successor state.
    pub String,
    /// Symbols written, one per tape.
    pub Vec<String>,
    /// Move tokens (`L`/`R`/`S`), one per tape.
    pub Vec<String>,
);

/// A complete machine description in its external shape.
///
/// Field names follow the serialized document: `Q` for states, `Sigma` and
/// `Gamma` for the input and tape alphabets, `q0` for the initial state and
/// `F` for the accepting set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDescription {
    /// State identifiers, including the initial and accepting states.
    #[serde(rename = "Q")]
    pub states: Vec<String>,
    /// Input alphabet.
    #[serde(rename = "Sigma")]
    pub input_alphabet: Vec<String>,
    /// Tape alphabet, a superset of the input alphabet plus the blank.
    #[serde(rename = "Gamma")]
    pub tape_alphabet: Vec<String>,
    /// The designated blank symbol.
    pub blank: String,
    /// Entry-point state, expected to be in `Q`.
    #[serde(rename = "q0")]
    pub initial_state: String,
    /// Accepting states; reaching one halts execution successfully.
    #[serde(rename = "F")]
    pub accepting_states: Vec<String>,
    /// Number of tapes, fixed for the life of the machine.
    pub num_tapes: usize,
    /// Step ceiling before a forced halt.
    pub max_steps: usize,
    /// The transition list. Keys must be unique per `(state, read-tuple)`.
    pub transitions: Vec<TransitionEntry>,
}

impl MachineDescription {
    /// Deserializes a description from its JSON form.
    pub fn from_json(content: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serializes the description as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let description = MachineDescription {
            states: vec!["start".into(), "halt".into()],
            input_alphabet: vec!["a".into()],
            tape_alphabet: vec!["_".into(), "a".into(), "b".into()],
            blank: "_".into(),
            initial_state: "start".into(),
            accepting_states: vec!["halt".into()],
            num_tapes: 1,
            max_steps: 100,
            transitions: vec![TransitionEntry(
                "start".into(),
                vec!["a".into()],
                "halt".into(),
                vec!["b".into()],
                vec!["R".into()],
            )],
        };

        let json = description.to_json().unwrap();
        assert!(json.contains("\"Q\""));
        assert!(json.contains("\"Sigma\""));
        assert!(json.contains("\"q0\""));

        let back = MachineDescription::from_json(&json).unwrap();
        assert_eq!(description, back);
    }

    #[test]
    fn test_transition_arity_is_enforced() {
        // Four elements instead of five.
        let json = r#"{
            "Q": ["start"],
            "Sigma": ["a"],
            "Gamma": ["_", "a"],
            "blank": "_",
            "q0": "start",
            "F": [],
            "num_tapes": 1,
            "max_steps": 10,
            "transitions": [["start", ["a"], "start", ["a"]]]
        }"#;

        let result = MachineDescription::from_json(json);
        assert!(matches!(result, Err(DescriptionError::Parse(_))));
    }

    #[test]
    fn test_extra_transition_elements_rejected() {
        let json = r#"{
            "Q": ["start"],
            "Sigma": ["a"],
            "Gamma": ["_", "a"],
            "blank": "_",
            "q0": "start",
            "F": [],
            "num_tapes": 1,
            "max_steps": 10,
            "transitions": [["start", ["a"], "start", ["a"], ["R"], "extra"]]
        }"#;

        let result = MachineDescription::from_json(json);
        assert!(matches!(result, Err(DescriptionError::Parse(_))));
    }
}
