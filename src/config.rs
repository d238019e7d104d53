//! CLI configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via DFASIM_CONFIG or --config)
//! 3. Environment variables

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input limits.
    pub limits: LimitsConfig,
    /// Output rendering.
    pub output: OutputConfig,
    /// Interactive mode.
    pub repl: ReplConfig,
}

impl Config {
    /// Loads configuration from `path` (or DFASIM_CONFIG), then applies
    /// environment variable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("DFASIM_CONFIG").ok().map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        self.limits.apply_overrides(&var);
        self.output.apply_overrides(&var);
        self.repl.apply_overrides(&var);
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.arrow.is_empty() {
            return Err(ConfigError::ValidationError(
                "output.arrow must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of symbols per input (0 = unlimited).
    pub max_input_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_len: 1_000_000,
        }
    }
}

impl LimitsConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(max) = var("DFASIM_MAX_INPUT_LEN") {
            if let Ok(n) = max.parse() {
                self.max_input_len = n;
            }
        }
    }

    /// Returns true if an input of `len` symbols is within the limit.
    pub fn allows(&self, len: usize) -> bool {
        self.max_input_len == 0 || len <= self.max_input_len
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Path: ...` / `Status: ...` lines.
    #[default]
    Text,
    /// One JSON object per input.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Output rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Separator between states in a rendered path.
    pub arrow: String,
    /// Whether to colorize output.
    pub color: bool,
    /// Default output format.
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            arrow: dfasim_core::ARROW.to_string(),
            color: true,
            format: OutputFormat::Text,
        }
    }
}

impl OutputConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(arrow) = var("DFASIM_ARROW") {
            if !arrow.is_empty() {
                self.arrow = arrow;
            }
        }

        if let Some(color) = var("DFASIM_COLOR") {
            self.color = color == "1" || color.to_lowercase() == "true";
        }

        if let Some(format) = var("DFASIM_FORMAT") {
            if let Ok(parsed) = format.parse() {
                self.format = parsed;
            }
        }
    }
}

/// Interactive mode configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// History file (defaults to ~/.dfasim_history).
    pub history_file: Option<PathBuf>,
}

impl ReplConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("DFASIM_HISTORY_FILE") {
            self.history_file = Some(PathBuf::from(path));
        }
    }

    /// Resolves the history file path.
    pub fn history_path(&self) -> PathBuf {
        if let Some(ref path) = self.history_file {
            return path.clone();
        }
        std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".dfasim_history"))
            .unwrap_or_else(|_| ".dfasim_history".into())
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => {
                write!(f, "failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::ValidationError(msg) => {
                write!(f, "configuration validation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
