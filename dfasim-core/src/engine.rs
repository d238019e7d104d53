//! Automaton engine - walks an input through the transition function.

use crate::definition::{Automaton, State, Symbol, Tokenization};
use crate::error::SimulationError;
use crate::outcome::{Path, SimulationOutcome, Verdict};

/// Runs `input` through `automaton` and reports the visited path and verdict.
///
/// The walk stops at the first symbol outside the alphabet or the first
/// (state, symbol) pair with no transition. In that case the returned path
/// holds the states visited before the failing step.
pub fn simulate(automaton: &Automaton, input: &[Symbol]) -> SimulationOutcome {
    let mut walk = Walk::new(automaton);

    for (position, symbol) in input.iter().enumerate() {
        if let Err(error) = walk.step(position, symbol) {
            tracing::debug!(
                code = error.error_code(),
                position,
                "simulation halted: {}",
                error
            );
            return walk.halt(error);
        }
    }

    walk.finish()
}

/// A single walk in progress.
struct Walk<'a> {
    automaton: &'a Automaton,
    current: State,
    path: Path,
}

impl<'a> Walk<'a> {
    fn new(automaton: &'a Automaton) -> Self {
        let current = automaton.start_state().clone();
        Self {
            automaton,
            path: Path::starting_at(current.clone()),
            current,
        }
    }

    fn step(&mut self, position: usize, symbol: &Symbol) -> Result<(), SimulationError> {
        if !self.automaton.has_symbol(symbol) {
            return Err(SimulationError::InvalidSymbol {
                symbol: symbol.as_str().to_string(),
                position,
            });
        }

        let next = self
            .automaton
            .get_transition(&self.current, symbol)
            .ok_or_else(|| SimulationError::UndefinedTransition {
                state: self.current.as_str().to_string(),
                symbol: symbol.as_str().to_string(),
                position,
            })?
            .clone();

        tracing::trace!(from = %self.current, %symbol, to = %next, "transition");

        self.path.push(next.clone());
        self.current = next;
        Ok(())
    }

    fn halt(self, error: SimulationError) -> SimulationOutcome {
        SimulationOutcome::Failed {
            path: self.path,
            error,
        }
    }

    fn finish(self) -> SimulationOutcome {
        let verdict = if self.automaton.is_accepting(&self.current) {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        };

        tracing::debug!(steps = self.path.len() - 1, %verdict, "simulation complete");

        SimulationOutcome::Completed {
            path: self.path,
            verdict,
        }
    }
}

impl Automaton {
    /// Runs `input` through this automaton. See [`simulate`].
    pub fn simulate(&self, input: &[Symbol]) -> SimulationOutcome {
        simulate(self, input)
    }

    /// Splits `input` with `tokenization` and runs it through this automaton.
    pub fn simulate_str(&self, input: &str, tokenization: Tokenization) -> SimulationOutcome {
        simulate(self, &tokenization.split(input))
    }

    /// Returns true if the walk completes in an accepting state.
    pub fn accepts(&self, input: &[Symbol]) -> bool {
        simulate(self, input).is_accepted()
    }
}
