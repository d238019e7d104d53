//! Simulation results.

use crate::definition::State;
use crate::error::SimulationError;
use serde::Serialize;
use std::fmt;

/// Separator used when rendering a path.
pub const ARROW: &str = " → ";

/// Ordered states visited during a walk, starting with the start state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<State>);

impl Path {
    pub(crate) fn starting_at(state: State) -> Self {
        Self(vec![state])
    }

    pub(crate) fn push(&mut self, state: State) {
        self.0.push(state);
    }

    pub fn states(&self) -> &[State] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&State> {
        self.0.last()
    }

    /// Renders the state names joined by `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(State::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(ARROW))
    }
}

impl From<Vec<State>> for Path {
    fn from(states: Vec<State>) -> Self {
        Self(states)
    }
}

/// Classification of the final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accepted => "ACCEPTED",
            Verdict::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SimulationOutcome {
    /// The whole input was consumed.
    Completed { path: Path, verdict: Verdict },

    /// The walk halted. `path` holds the states visited before the failing step.
    Failed { path: Path, error: SimulationError },
}

impl SimulationOutcome {
    pub fn path(&self) -> &Path {
        match self {
            SimulationOutcome::Completed { path, .. } => path,
            SimulationOutcome::Failed { path, .. } => path,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            SimulationOutcome::Completed { verdict, .. } => Some(*verdict),
            SimulationOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&SimulationError> {
        match self {
            SimulationOutcome::Completed { .. } => None,
            SimulationOutcome::Failed { error, .. } => Some(error),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict() == Some(Verdict::Accepted)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SimulationOutcome::Failed { .. })
    }

    /// Converts into a `Result`, dropping the partial path on failure.
    pub fn into_result(self) -> Result<(Path, Verdict), SimulationError> {
        match self {
            SimulationOutcome::Completed { path, verdict } => Ok((path, verdict)),
            SimulationOutcome::Failed { error, .. } => Err(error),
        }
    }

    /// Renders the outcome as `Path: ...\nStatus: ...` using `arrow` between states.
    pub fn render(&self, arrow: &str) -> String {
        match self {
            SimulationOutcome::Completed { path, verdict } => {
                format!("Path: {}\nStatus: {}", path.join(arrow), verdict)
            }
            SimulationOutcome::Failed { error, .. } => format!("Error: {}", error),
        }
    }
}

impl fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(ARROW))
    }
}
