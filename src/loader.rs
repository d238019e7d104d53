//! Reads automaton definitions from disk.

use dfasim_core::{Automaton, CoreError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while loading a definition file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file '{}' could not be read: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file '{}' is not valid JSON: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("file '{}' does not describe a DFA: {source}", .path.display())]
    Definition { path: PathBuf, source: CoreError },
}

/// Loads and validates an automaton from a JSON file.
pub fn load(path: impl AsRef<Path>) -> Result<Automaton, LoadError> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let json: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    let automaton = Automaton::from_json(&json).map_err(|source| LoadError::Definition {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "Loaded DFA from {} ({} states, checksum {})",
        path.display(),
        automaton.states().len(),
        automaton.checksum()
    );

    Ok(automaton)
}
