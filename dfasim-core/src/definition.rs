//! Automaton definition types.
//!
//! Definitions use a JSON document:
//!
//! ```json
//! {
//!   "alphabet": ["0", "1"],
//!   "start_state": "q0",
//!   "accept_states": ["q1"],
//!   "transitions": {
//!     "q0": {"0": "q0", "1": "q1"},
//!     "q1": {"0": "q1", "1": "q0"}
//!   },
//!   "test_string": "101"
//! }
//! ```

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// A state of the automaton.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(pub String);

impl State {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for State {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A symbol of the input alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a raw input string is split into symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tokenization {
    /// Every character is one symbol.
    Chars,
    /// Symbols are separated by whitespace.
    Whitespace,
}

impl Tokenization {
    /// Splits `input` into symbols.
    pub fn split(self, input: &str) -> Vec<Symbol> {
        match self {
            Tokenization::Chars => input.chars().map(Symbol::from).collect(),
            Tokenization::Whitespace => input.split_whitespace().map(Symbol::from).collect(),
        }
    }
}

/// Default input carried by a definition: either one string to tokenize or
/// an explicit list of symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestString {
    Text(String),
    Symbols(Vec<String>),
}

impl TestString {
    /// Symbols of this input. A list is taken as is; text is split with `tokenization`.
    pub fn symbols(&self, tokenization: Tokenization) -> Vec<Symbol> {
        match self {
            TestString::Text(text) => tokenization.split(text),
            TestString::Symbols(symbols) => symbols.iter().map(|s| Symbol(s.clone())).collect(),
        }
    }
}

impl fmt::Display for TestString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestString::Text(text) => f.write_str(text),
            TestString::Symbols(symbols) => f.write_str(&symbols.join(" ")),
        }
    }
}

/// Raw automaton definition as read from a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomatonDefinitionRaw {
    /// Input alphabet.
    pub alphabet: Vec<String>,

    /// Optional explicit list of states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,

    /// State the walk starts in.
    pub start_state: String,

    /// Accepting states.
    pub accept_states: Vec<String>,

    /// Transition function: state -> (symbol -> state).
    pub transitions: BTreeMap<String, BTreeMap<String, String>>,

    /// Default input to simulate when none is supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_string: Option<TestString>,

    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// Validated and indexed automaton.
#[derive(Debug, Clone)]
pub struct Automaton {
    alphabet: BTreeSet<Symbol>,

    /// All states, declared or referenced.
    states: BTreeSet<State>,

    start: State,

    accepting: BTreeSet<State>,

    /// Transitions indexed by (from_state, symbol) -> to_state.
    transitions: HashMap<(State, Symbol), State>,

    raw: AutomatonDefinitionRaw,

    checksum: String,
}

impl Automaton {
    /// Parses and validates an automaton from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    /// Parses and validates an automaton from JSON.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, CoreError> {
        let raw: AutomatonDefinitionRaw = serde_json::from_value(json.clone())
            .map_err(|e| CoreError::malformed(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Creates an automaton from raw parts.
    pub fn from_raw(raw: AutomatonDefinitionRaw) -> Result<Self, CoreError> {
        // Alphabet must be a set of non-empty tokens
        let mut alphabet = BTreeSet::new();
        for token in &raw.alphabet {
            if token.is_empty() {
                return Err(CoreError::malformed("alphabet contains an empty symbol"));
            }
            if !alphabet.insert(Symbol(token.clone())) {
                return Err(CoreError::malformed(format!(
                    "duplicate symbol '{}' in alphabet",
                    token
                )));
            }
        }

        let start = State(raw.start_state.clone());
        let accepting: BTreeSet<State> =
            raw.accept_states.iter().map(|s| State(s.clone())).collect();

        let mut transitions = HashMap::new();
        let mut referenced: BTreeSet<State> = BTreeSet::new();
        referenced.insert(start.clone());
        referenced.extend(accepting.iter().cloned());

        for (from, row) in &raw.transitions {
            let from = State(from.clone());
            referenced.insert(from.clone());
            for (symbol, to) in row {
                let to = State(to.clone());
                referenced.insert(to.clone());
                transitions.insert((from.clone(), Symbol(symbol.clone())), to);
            }
        }

        if referenced.iter().any(|s| s.as_str().is_empty()) {
            return Err(CoreError::malformed("state names must not be empty"));
        }

        // With an explicit state list, every referenced state must be declared
        let states = match &raw.states {
            Some(declared) => {
                let declared: BTreeSet<State> =
                    declared.iter().map(|s| State(s.clone())).collect();
                if let Some(missing) = referenced.iter().find(|s| !declared.contains(*s)) {
                    return Err(CoreError::malformed(format!(
                        "state '{}' is not in the states list",
                        missing
                    )));
                }
                declared
            }
            None => referenced,
        };

        let json_bytes = serde_json::to_vec(&raw)?;
        let checksum = format!("{:08x}", crc32c::crc32c(&json_bytes));

        tracing::debug!(
            states = states.len(),
            symbols = alphabet.len(),
            transitions = transitions.len(),
            "built automaton"
        );

        Ok(Self {
            alphabet,
            states,
            start,
            accepting,
            transitions,
            raw,
            checksum,
        })
    }

    /// Looks up the successor of `state` on `symbol`.
    pub fn get_transition(&self, state: &State, symbol: &Symbol) -> Option<&State> {
        self.transitions.get(&(state.clone(), symbol.clone()))
    }

    /// Returns true if `symbol` belongs to the alphabet.
    pub fn has_symbol(&self, symbol: &Symbol) -> bool {
        self.alphabet.contains(symbol)
    }

    /// Returns true if `state` is known to this automaton.
    pub fn has_state(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    /// Returns true if `state` is accepting.
    pub fn is_accepting(&self, state: &State) -> bool {
        self.accepting.contains(state)
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn states(&self) -> &BTreeSet<State> {
        &self.states
    }

    pub fn start_state(&self) -> &State {
        &self.start
    }

    pub fn accept_states(&self) -> &BTreeSet<State> {
        &self.accepting
    }

    /// Number of defined (state, symbol) pairs.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Iterates over all transitions in a stable order.
    pub fn transitions(&self) -> impl Iterator<Item = (&State, &Symbol, &State)> {
        let mut all: Vec<_> = self
            .transitions
            .iter()
            .map(|((from, symbol), to)| (from, symbol, to))
            .collect();
        all.sort();
        all.into_iter()
    }

    /// Symbols with a defined transition out of `state`.
    pub fn symbols_from(&self, state: &State) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self
            .transitions
            .keys()
            .filter(|(s, _)| s == state)
            .map(|(_, sym)| sym)
            .collect();
        symbols.sort();
        symbols
    }

    /// The default input carried by the definition, if any.
    pub fn test_string(&self) -> Option<&TestString> {
        self.raw.test_string.as_ref()
    }

    /// Metadata carried by the definition, if any.
    pub fn meta(&self) -> Option<&serde_json::Value> {
        self.raw.meta.as_ref()
    }

    /// Tokenization that fits the alphabet: per character when every symbol
    /// is a single character, by whitespace otherwise.
    pub fn default_tokenization(&self) -> Tokenization {
        if self.alphabet.iter().all(|s| s.as_str().chars().count() == 1) {
            Tokenization::Chars
        } else {
            Tokenization::Whitespace
        }
    }

    /// Raw definition as loaded.
    pub fn raw(&self) -> &AutomatonDefinitionRaw {
        &self.raw
    }

    /// CRC32C of the serialized definition.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }
}
