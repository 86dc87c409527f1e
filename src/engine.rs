//! The execution engine: a stateful interpreter that runs one deterministic
//! machine step-by-step against k tapes.
//!
//! Each engine owns its tapes, head positions, and step counter exclusively;
//! the only shared piece is the immutable [`Machine`] behind an `Arc`, which
//! several engines may reference concurrently since it is never mutated.

use crate::machine::Machine;
use crate::tape::Tape;
use crate::types::{ConfigurationError, Outcome, Snapshot};
use std::sync::Arc;

/// A single simulation over one machine.
pub struct Engine {
    machine: Arc<Machine>,
    tapes: Vec<Tape>,
    state: String,
    step_count: usize,
    halted: bool,
}

impl Engine {
    /// Creates an engine with every tape seeded blank. Call [`Engine::reset`]
    /// to supply input words.
    pub fn new(machine: Arc<Machine>) -> Self {
        let tapes = (0..machine.tape_count())
            .map(|_| Tape::seeded("", machine.blank()))
            .collect();
        let state = machine.initial_state().to_string();

        Self {
            machine,
            tapes,
            state,
            step_count: 0,
            halted: false,
        }
    }

    /// Discards the previous execution state and seeds the tapes anew.
    ///
    /// Tape `i` receives `seeds[i]` when present and non-empty, otherwise a
    /// single blank cell; a seed list longer than the tape count is a
    /// [`ConfigurationError`]. Heads return to offset 0, the state to the
    /// initial state, and the step counter to zero.
    pub fn reset(&mut self, seeds: &[String]) -> Result<(), ConfigurationError> {
        if seeds.len() > self.machine.tape_count() {
            return Err(ConfigurationError::SeedCountMismatch {
                seeds: seeds.len(),
                tapes: self.machine.tape_count(),
            });
        }

        self.tapes = (0..self.machine.tape_count())
            .map(|i| {
                let word = seeds.get(i).map(String::as_str).unwrap_or("");
                Tape::seeded(word, self.machine.blank())
            })
            .collect();
        self.state = self.machine.initial_state().to_string();
        self.step_count = 0;
        self.halted = false;

        Ok(())
    }

    /// Executes one step. Returns `true` when a transition was applied, even
    /// if that step also reached the step ceiling.
    ///
    /// Acceptance is checked before reading: a machine already in an
    /// accepting state halts without consuming a step. A configuration with
    /// no defined transition also halts; absence of a transition is the
    /// model's only rejection mechanism.
    pub fn step(&mut self) -> bool {
        if self.halted {
            return false;
        }

        if self.machine.is_accepting(&self.state) {
            self.halted = true;
            return false;
        }

        let read = self.symbols();
        let action = match self.machine.lookup(&self.state, &read) {
            Some(action) => action.clone(),
            None => {
                self.halted = true;
                return false;
            }
        };

        for (tape, (&symbol, &direction)) in self
            .tapes
            .iter_mut()
            .zip(action.write.iter().zip(action.moves.iter()))
        {
            tape.write(symbol);
            tape.shift(direction);
        }

        self.state = action.next_state;
        self.step_count += 1;
        if self.step_count >= self.machine.step_cap() {
            self.halted = true;
        }

        true
    }

    /// Runs until the machine halts: by acceptance, by an undefined
    /// transition, or by exhausting the step budget.
    pub fn run(&mut self) -> Outcome {
        while self.step() {}
        self.classify()
    }

    /// The terminal outcome, or `None` while the machine is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        self.halted.then(|| self.classify())
    }

    // Only meaningful once halted: accepting membership wins, then budget
    // exhaustion, and whatever remains halted on a missing transition.
    fn classify(&self) -> Outcome {
        if self.machine.is_accepting(&self.state) {
            Outcome::Accepted
        } else if self.step_count >= self.machine.step_cap() {
            Outcome::BudgetExhausted
        } else {
            Outcome::Rejected {
                state: self.state.clone(),
                symbols: self.symbols(),
            }
        }
    }

    /// Renders tape `index` as a string. With `trim_blanks`, the blank symbol
    /// is stripped from both ends only.
    pub fn read_tape(&self, index: usize, trim_blanks: bool) -> Result<String, ConfigurationError> {
        self.tapes
            .get(index)
            .map(|tape| tape.render(trim_blanks))
            .ok_or(ConfigurationError::TapeIndexOutOfBounds {
                index,
                tapes: self.tapes.len(),
            })
    }

    /// Captures a read-only view of the execution state. No side effects.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step_count: self.step_count,
            state: self.state.clone(),
            heads: self.tapes.iter().map(Tape::head).collect(),
            tapes: self.tapes.iter().map(|tape| tape.render(false)).collect(),
        }
    }

    /// The symbols currently under the heads.
    pub fn symbols(&self) -> Vec<char> {
        self.tapes.iter().map(Tape::read).collect()
    }

    /// Current state identifier.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Steps executed since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Whether execution has stopped.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The machine this engine interprets.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }
}
