//! On-demand structural checks.
//!
//! Findings are informational: an automaton with diagnostics still simulates,
//! it just may halt with an undefined transition or never reach some states.

use crate::definition::{Automaton, State, Symbol, Tokenization};
use serde::Serialize;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

/// A finding of [`Automaton::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A transition is keyed on a symbol outside the alphabet and can never fire.
    SymbolOutsideAlphabet { state: State, symbol: Symbol },

    /// An alphabet symbol contains whitespace, so whitespace-split input can
    /// never produce it.
    UnenterableSymbol { symbol: Symbol },

    /// The state has no transition for these alphabet symbols.
    MissingTransitions { state: State, symbols: Vec<Symbol> },

    /// No walk from the start state reaches this state.
    UnreachableState { state: State },

    /// No input can be accepted.
    NoAcceptStates,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SymbolOutsideAlphabet { state, symbol } => write!(
                f,
                "state '{}' has a transition on '{}', which is not in the alphabet",
                state, symbol
            ),
            Diagnostic::UnenterableSymbol { symbol } => write!(
                f,
                "symbol '{}' contains whitespace and cannot be entered as input",
                symbol
            ),
            Diagnostic::MissingTransitions { state, symbols } => {
                let list: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
                write!(
                    f,
                    "state '{}' has no transition on: {}",
                    state,
                    list.join(", ")
                )
            }
            Diagnostic::UnreachableState { state } => {
                write!(f, "state '{}' is unreachable from the start state", state)
            }
            Diagnostic::NoAcceptStates => write!(f, "no accepting states are defined"),
        }
    }
}

impl Automaton {
    /// Checks structural consistency and reports every finding.
    pub fn check(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (from, symbol, _) in self.transitions() {
            if !self.has_symbol(symbol) {
                diagnostics.push(Diagnostic::SymbolOutsideAlphabet {
                    state: from.clone(),
                    symbol: symbol.clone(),
                });
            }
        }

        if self.default_tokenization() == Tokenization::Whitespace {
            for symbol in self.alphabet() {
                if symbol.as_str().chars().any(char::is_whitespace) {
                    diagnostics.push(Diagnostic::UnenterableSymbol {
                        symbol: symbol.clone(),
                    });
                }
            }
        }

        for state in self.states() {
            let missing: Vec<Symbol> = self
                .alphabet()
                .iter()
                .filter(|symbol| self.get_transition(state, symbol).is_none())
                .cloned()
                .collect();
            if !missing.is_empty() {
                diagnostics.push(Diagnostic::MissingTransitions {
                    state: state.clone(),
                    symbols: missing,
                });
            }
        }

        let reachable = self.reachable_states();
        for state in self.states() {
            if !reachable.contains(state) {
                diagnostics.push(Diagnostic::UnreachableState {
                    state: state.clone(),
                });
            }
        }

        if self.accept_states().is_empty() {
            diagnostics.push(Diagnostic::NoAcceptStates);
        }

        tracing::debug!(findings = diagnostics.len(), "structural check complete");
        diagnostics
    }

    /// States reachable from the start state over alphabet symbols.
    pub fn reachable_states(&self) -> BTreeSet<State> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();

        seen.insert(self.start_state().clone());
        queue.push_back(self.start_state().clone());

        while let Some(state) = queue.pop_front() {
            for symbol in self.alphabet() {
                if let Some(next) = self.get_transition(&state, symbol) {
                    if seen.insert(next.clone()) {
                        queue.push_back(next.clone());
                    }
                }
            }
        }

        seen
    }

    /// Returns true if every state has a transition for every alphabet symbol.
    pub fn is_complete(&self) -> bool {
        self.states().iter().all(|state| {
            self.alphabet()
                .iter()
                .all(|symbol| self.get_transition(state, symbol).is_some())
        })
    }
}
