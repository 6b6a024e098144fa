//! heroc-util - Foundation utilities shared by the compiler phases.
//!
//! This crate holds the pieces that do not belong to any single phase:
//! the generic finite state machine driving the lexer's literal
//! recognition, and the hashing containers used by later phases.

pub mod fsm;

pub use fsm::{Machine, State, NULL_STATE};

// Re-export commonly used types
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
