//! Graphviz export.

use crate::definition::{Automaton, State};
use std::collections::BTreeMap;

impl Automaton {
    /// Renders the automaton as a Graphviz `digraph`.
    ///
    /// Accepting states get a double periphery and an invisible entry node
    /// points at the start state. Parallel transitions share one edge with
    /// their symbols joined in the label.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();

        out.push_str("digraph dfa {\n");
        out.push_str("graph [center=true pad=.5];\n");
        out.push_str("rankdir=LR;\n");
        out.push_str("__start [shape=point,style=invis];\n");

        for state in self.states() {
            let peripheries = if self.is_accepting(state) { 2 } else { 1 };
            out.push_str(&format!(
                "{}[shape=circle,peripheries={}];\n",
                quote(state.as_str()),
                peripheries
            ));
        }

        out.push_str(&format!("__start -> {};\n", quote(self.start_state().as_str())));

        let mut edges: BTreeMap<(&State, &State), Vec<&str>> = BTreeMap::new();
        for (from, symbol, to) in self.transitions() {
            edges.entry((from, to)).or_default().push(symbol.as_str());
        }

        for ((from, to), symbols) in edges {
            out.push_str(&format!(
                "{} -> {} [label={}];\n",
                quote(from.as_str()),
                quote(to.as_str()),
                quote(&symbols.join(","))
            ));
        }

        out.push_str("}\n");
        out
    }
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_output() {
        let dfa = Automaton::from_json(&serde_json::json!({
            "alphabet": ["0", "1"],
            "start_state": "q0",
            "accept_states": ["q1"],
            "transitions": {
                "q0": {"0": "q0", "1": "q1"},
                "q1": {"0": "q1", "1": "q1"}
            }
        }))
        .unwrap();

        let dot = dfa.to_dot();
        assert!(dot.starts_with("digraph dfa {\n"));
        assert!(dot.contains("\"q0\"[shape=circle,peripheries=1];"));
        assert!(dot.contains("\"q1\"[shape=circle,peripheries=2];"));
        assert!(dot.contains("__start -> \"q0\";"));
        assert!(dot.contains("\"q0\" -> \"q0\" [label=\"0\"];"));
        assert!(dot.contains("\"q1\" -> \"q1\" [label=\"0,1\"];"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }
}
