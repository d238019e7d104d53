//! dfasim - Deterministic finite automaton simulator
//!
//! Loads a DFA from a JSON file and walks input strings through it.

mod commands;
mod config;
mod loader;
mod repl;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use config::{Config, OutputFormat};
use dfasim_core::Tokenization;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dfasim")]
#[command(about = "Simulate deterministic finite automata defined in JSON")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, env = "DFASIM_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run input strings through a DFA (defaults to the file's test_string)
    Run {
        /// DFA definition file
        file: PathBuf,

        /// Input string (repeatable)
        #[arg(short, long = "input")]
        inputs: Vec<String>,

        /// How inputs are split into symbols (inferred from the alphabet by default)
        #[arg(short, long, value_enum)]
        tokens: Option<TokenMode>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Report structural issues in a DFA definition
    Check {
        /// DFA definition file
        file: PathBuf,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Summarize a DFA definition
    Inspect {
        /// DFA definition file
        file: PathBuf,
    },

    /// Export a DFA as a Graphviz digraph
    Dot {
        /// DFA definition file
        file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Test strings against a DFA interactively
    Repl {
        /// DFA definition file
        file: PathBuf,

        /// How inputs are split into symbols (inferred from the alphabet by default)
        #[arg(short, long, value_enum)]
        tokens: Option<TokenMode>,
    },
}

/// Command-line spelling of [`Tokenization`].
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TokenMode {
    /// One symbol per character
    Chars,
    /// Whitespace-separated symbols
    Whitespace,
}

impl From<TokenMode> for Tokenization {
    fn from(mode: TokenMode) -> Self {
        match mode {
            TokenMode::Chars => Tokenization::Chars,
            TokenMode::Whitespace => Tokenization::Whitespace,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(1);
        }
    };

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Repl { file, tokens } => {
            let automaton = match loader::load(&file) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("{}: {}", "Error".red(), e);
                    std::process::exit(1);
                }
            };
            repl::run(&automaton, tokens.map(Into::into), &config)?;
        }
        cmd => match commands::execute(cmd, &config) {
            Ok(report) => {
                print!("{}", report.output);
                if !report.success {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("{}: {}", "Error".red(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
