//! Core error types.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while building an automaton from a definition.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed definition: {reason}")]
    MalformedDefinition { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CoreError::MalformedDefinition {
            reason: reason.into(),
        }
    }

    /// Returns an error code suitable for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::MalformedDefinition { .. } => "MALFORMED_DEFINITION",
            CoreError::Json(_) => "MALFORMED_DEFINITION",
        }
    }
}

/// Reasons a simulation halts before consuming its whole input.
///
/// These are reported inside a [`SimulationOutcome`](crate::SimulationOutcome)
/// and never abort the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationError {
    #[error("symbol '{symbol}' is not in the DFA alphabet")]
    InvalidSymbol { symbol: String, position: usize },

    #[error("no transition from state '{state}' on symbol '{symbol}'")]
    UndefinedTransition {
        state: String,
        symbol: String,
        position: usize,
    },
}

impl SimulationError {
    /// Returns an error code suitable for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            SimulationError::InvalidSymbol { .. } => "INVALID_SYMBOL",
            SimulationError::UndefinedTransition { .. } => "UNDEFINED_TRANSITION",
        }
    }

    /// The offending input symbol.
    pub fn symbol(&self) -> &str {
        match self {
            SimulationError::InvalidSymbol { symbol, .. } => symbol,
            SimulationError::UndefinedTransition { symbol, .. } => symbol,
        }
    }

    /// Index of the offending symbol in the input.
    pub fn position(&self) -> usize {
        match self {
            SimulationError::InvalidSymbol { position, .. } => *position,
            SimulationError::UndefinedTransition { position, .. } => *position,
        }
    }

    /// The state the walk was in when it halted, for undefined transitions.
    pub fn state(&self) -> Option<&str> {
        match self {
            SimulationError::InvalidSymbol { .. } => None,
            SimulationError::UndefinedTransition { state, .. } => Some(state),
        }
    }
}
