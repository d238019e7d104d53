//! # dfasim-core
//!
//! Deterministic finite automaton engine for dfasim.
//!
//! This crate provides:
//! - Automaton definition parsing and validation
//! - The transition walk producing a path and a verdict
//! - On-demand structural checks
//! - Graphviz export

pub mod check;
pub mod definition;
pub mod dot;
pub mod engine;
pub mod error;
pub mod outcome;

pub use check::Diagnostic;
pub use definition::{Automaton, AutomatonDefinitionRaw, State, Symbol, TestString, Tokenization};
pub use engine::simulate;
pub use error::{CoreError, SimulationError};
pub use outcome::{Path, SimulationOutcome, Verdict, ARROW};
