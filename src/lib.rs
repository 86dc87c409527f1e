//! This crate provides a deterministic multi-tape Turing machine simulator.
//! It includes modules for loading serialized machine descriptions, executing
//! them step-by-step or to completion, and generating the keyed shift-cipher
//! machines that encode and decode `KEY#MESSAGE` tapes.

pub mod cipher;
pub mod compiler;
pub mod description;
pub mod engine;
pub mod loader;
pub mod machine;
pub mod tape;
pub mod types;

/// Re-exports the cipher surface: keys, errors, and the encode/decode calls.
pub use cipher::{decode, encode, CipherError, Key};
/// Re-exports the cipher machine builder and its direction flag.
pub use compiler::{build, Mode};
/// Re-exports the serialized description form.
pub use description::{MachineDescription, TransitionEntry};
/// Re-exports the execution engine.
pub use engine::Engine;
/// Re-exports the loader entry points.
pub use loader::{materialize, MachineLoader};
/// Re-exports the immutable loaded machine.
pub use machine::Machine;
/// Re-exports the shared core types.
pub use types::{ConfigurationError, DescriptionError, Direction, Outcome, Snapshot};
