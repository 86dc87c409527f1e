//! The immutable, loaded form of a machine: metadata plus the keyed
//! transition table. Built once by the loader and never mutated afterwards,
//! so it is safe to share across engine instances behind an `Arc`.

use crate::types::Direction;
use std::collections::{HashMap, HashSet};

/// Composite lookup key: current state plus the k-tuple of read symbols.
///
/// Structural equality and hashing make this a plain value key; two entries
/// with the same key are a description error caught at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionKey {
    /// Source state.
    pub state: String,
    /// Symbols under the heads, one per tape.
    pub read: Vec<char>,
}

/// The effect of a transition: successor state, symbols to write, and one
/// head move per tape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionAction {
    /// Successor state.
    pub next_state: String,
    /// Symbols written, one per tape.
    pub write: Vec<char>,
    /// Head moves, one per tape.
    pub moves: Vec<Direction>,
}

/// A validated machine: metadata and transition table, immutable after load.
#[derive(Debug, Clone)]
pub struct Machine {
    pub(crate) states: HashSet<String>,
    pub(crate) input_alphabet: HashSet<char>,
    pub(crate) tape_alphabet: HashSet<char>,
    pub(crate) blank: char,
    pub(crate) initial_state: String,
    pub(crate) accepting_states: HashSet<String>,
    pub(crate) tape_count: usize,
    pub(crate) step_cap: usize,
    pub(crate) table: HashMap<TransitionKey, TransitionAction>,
}

impl Machine {
    /// Looks up the transition for `(state, read-tuple)`, if any is defined.
    pub fn lookup(&self, state: &str, read: &[char]) -> Option<&TransitionAction> {
        self.table.get(&TransitionKey {
            state: state.to_string(),
            read: read.to_vec(),
        })
    }

    /// Whether `state` is in the accepting set.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.accepting_states.contains(state)
    }

    /// The designated blank symbol.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// The machine's entry-point state.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Number of tapes the machine operates on.
    pub fn tape_count(&self) -> usize {
        self.tape_count
    }

    /// Maximum steps before a forced halt.
    pub fn step_cap(&self) -> usize {
        self.step_cap
    }

    /// Declared state identifiers.
    pub fn states(&self) -> &HashSet<String> {
        &self.states
    }

    /// Declared input alphabet.
    pub fn input_alphabet(&self) -> &HashSet<char> {
        &self.input_alphabet
    }

    /// Declared tape alphabet.
    pub fn tape_alphabet(&self) -> &HashSet<char> {
        &self.tape_alphabet
    }

    /// Number of transitions in the table.
    pub fn transition_count(&self) -> usize {
        self.table.len()
    }

    /// Iterates over the transition table.
    pub fn transitions(&self) -> impl Iterator<Item = (&TransitionKey, &TransitionAction)> {
        self.table.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_machine() -> Machine {
        let mut table = HashMap::new();
        table.insert(
            TransitionKey {
                state: "start".to_string(),
                read: vec!['a'],
            },
            TransitionAction {
                next_state: "done".to_string(),
                write: vec!['b'],
                moves: vec![Direction::Right],
            },
        );

        Machine {
            states: ["start".to_string(), "done".to_string()].into(),
            input_alphabet: ['a'].into(),
            tape_alphabet: ['_', 'a', 'b'].into(),
            blank: '_',
            initial_state: "start".to_string(),
            accepting_states: ["done".to_string()].into(),
            tape_count: 1,
            step_cap: 100,
            table,
        }
    }

    #[test]
    fn test_lookup_hits_and_misses() {
        let machine = sample_machine();

        let action = machine.lookup("start", &['a']).unwrap();
        assert_eq!(action.next_state, "done");
        assert_eq!(action.write, vec!['b']);

        assert!(machine.lookup("start", &['b']).is_none());
        assert!(machine.lookup("done", &['a']).is_none());
    }

    #[test]
    fn test_accepting_membership() {
        let machine = sample_machine();
        assert!(machine.is_accepting("done"));
        assert!(!machine.is_accepting("start"));
    }

    #[test]
    fn test_key_structural_equality() {
        let a = TransitionKey {
            state: "q".to_string(),
            read: vec!['x', 'y'],
        };
        let b = TransitionKey {
            state: "q".to_string(),
            read: vec!['x', 'y'],
        };
        assert_eq!(a, b);

        let c = TransitionKey {
            state: "q".to_string(),
            read: vec!['y', 'x'],
        };
        assert_ne!(a, c);
    }
}
