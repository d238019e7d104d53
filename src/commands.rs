//! Command execution.

use crate::config::{Config, OutputFormat};
use crate::loader;
use crate::Commands;
use colored::Colorize;
use dfasim_core::{Automaton, SimulationOutcome, Symbol, Verdict};

/// Output of a one-shot command.
#[derive(Debug)]
pub struct Report {
    pub output: String,
    /// False if any input failed to simulate.
    pub success: bool,
}

impl Report {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

/// Executes a command and returns the formatted output.
pub fn execute(cmd: Commands, config: &Config) -> Result<Report, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Repl { .. } => unreachable!(),

        Commands::Run {
            file,
            inputs,
            tokens,
            format,
        } => {
            let automaton = loader::load(&file)?;
            let tokenization = tokens
                .map(Into::into)
                .unwrap_or_else(|| automaton.default_tokenization());

            let inputs: Vec<(String, Vec<Symbol>)> = if inputs.is_empty() {
                let test_string = automaton.test_string().ok_or_else(|| {
                    format!(
                        "'{}' has no test_string; pass one with --input",
                        file.display()
                    )
                })?;
                vec![(test_string.to_string(), test_string.symbols(tokenization))]
            } else {
                inputs
                    .into_iter()
                    .map(|input| {
                        let symbols = tokenization.split(&input);
                        (input, symbols)
                    })
                    .collect()
            };

            Ok(run_inputs(
                &automaton,
                &inputs,
                format.unwrap_or(config.output.format),
                config,
            ))
        }

        Commands::Check { file, format } => {
            let automaton = loader::load(&file)?;
            let diagnostics = automaton.check();

            let output = match format.unwrap_or(config.output.format) {
                OutputFormat::Json => {
                    format!("{}\n", serde_json::to_string_pretty(&diagnostics)?)
                }
                OutputFormat::Text if diagnostics.is_empty() => {
                    format!("{}\n", "No issues found".green())
                }
                OutputFormat::Text => {
                    let mut output = String::new();
                    for diagnostic in &diagnostics {
                        output.push_str(&format!("{}: {}\n", "warning".yellow(), diagnostic));
                    }
                    output
                }
            };

            Ok(Report::ok(output))
        }

        Commands::Inspect { file } => {
            let automaton = loader::load(&file)?;
            Ok(Report::ok(format_summary(&automaton)))
        }

        Commands::Dot { file, output } => {
            let automaton = loader::load(&file)?;
            let dot = automaton.to_dot();

            match output {
                Some(path) => {
                    std::fs::write(&path, dot)?;
                    Ok(Report::ok(format!(
                        "{} {}\n",
                        "Wrote".green(),
                        path.display().to_string().cyan()
                    )))
                }
                None => Ok(Report::ok(dot)),
            }
        }
    }
}

/// Simulates every `(input, symbols)` pair and renders the results.
fn run_inputs(
    automaton: &Automaton,
    inputs: &[(String, Vec<Symbol>)],
    format: OutputFormat,
    config: &Config,
) -> Report {
    let mut output = String::new();
    let mut success = true;

    if format == OutputFormat::Text {
        output.push_str(&format!("{}\n", "=== DFA SIMULATION ===".bold()));
    }

    for (i, (input, symbols)) in inputs.iter().enumerate() {
        let rendered = if !config.limits.allows(symbols.len()) {
            success = false;
            let message = format!(
                "input has {} symbols, exceeding the limit of {}",
                symbols.len(),
                config.limits.max_input_len
            );
            match format {
                OutputFormat::Text => format!("{}: {}", "Error".red(), message),
                OutputFormat::Json => serde_json::json!({
                    "input": input,
                    "error": {"kind": "INPUT_TOO_LONG", "message": message},
                })
                .to_string(),
            }
        } else {
            let outcome = automaton.simulate(symbols);
            success &= !outcome.is_failure();
            match format {
                OutputFormat::Text => render_outcome(&outcome, &config.output.arrow),
                OutputFormat::Json => serde_json::json!({
                    "input": input,
                    "outcome": outcome,
                })
                .to_string(),
            }
        };

        match format {
            OutputFormat::Text => {
                if i > 0 {
                    output.push('\n');
                }
                output.push_str(&format!("Input: {}\n{}\n", input.cyan(), rendered));
            }
            OutputFormat::Json => {
                output.push_str(&rendered);
                output.push('\n');
            }
        }
    }

    Report { output, success }
}

/// Renders an outcome as `Path: ...` / `Status: ...`, colorizing the status.
pub(crate) fn render_outcome(outcome: &SimulationOutcome, arrow: &str) -> String {
    match outcome {
        SimulationOutcome::Completed { path, verdict } => {
            let status = match verdict {
                Verdict::Accepted => verdict.as_str().green(),
                Verdict::Rejected => verdict.as_str().yellow(),
            };
            format!("Path: {}\nStatus: {}", path.join(arrow), status)
        }
        SimulationOutcome::Failed { error, .. } => format!("{}: {}", "Error".red(), error),
    }
}

/// Formats a summary of the automaton.
fn format_summary(automaton: &Automaton) -> String {
    let join = |items: Vec<&str>| {
        if items.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            items.join(", ")
        }
    };

    let completeness = if automaton.is_complete() {
        "complete".green()
    } else {
        "partial".yellow()
    };

    let mut output = format!(
        "{}\n  Alphabet: {}\n  States: {}\n  Start: {}\n  Accepting: {}\n  Transitions: {} ({})\n",
        format!("DFA (checksum: {})", automaton.checksum()).bold(),
        join(automaton.alphabet().iter().map(|s| s.as_str()).collect()),
        join(automaton.states().iter().map(|s| s.as_str()).collect()),
        automaton.start_state().as_str().cyan(),
        join(automaton.accept_states().iter().map(|s| s.as_str()).collect()),
        automaton.transition_count(),
        completeness
    );

    if let Some(test_string) = automaton.test_string() {
        output.push_str(&format!("  Test string: {}\n", test_string));
    }

    if let Some(meta) = automaton.meta() {
        output.push_str(&format!("  Meta: {}\n", meta));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfasim_core::Tokenization;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parity_dfa() -> Automaton {
        Automaton::from_json(&serde_json::json!({
            "alphabet": ["0", "1"],
            "start_state": "q0",
            "accept_states": ["q1"],
            "transitions": {
                "q0": {"0": "q0", "1": "q1"},
                "q1": {"0": "q1", "1": "q0"}
            },
            "test_string": "101"
        }))
        .unwrap()
    }

    fn chars(inputs: &[&str]) -> Vec<(String, Vec<Symbol>)> {
        inputs
            .iter()
            .map(|input| (input.to_string(), Tokenization::Chars.split(input)))
            .collect()
    }

    fn write_definition(json: &serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, json).unwrap();
        file.flush().unwrap();
        file
    }

    fn run_file(file: &NamedTempFile) -> Result<Report, Box<dyn std::error::Error>> {
        execute(
            Commands::Run {
                file: file.path().to_path_buf(),
                inputs: vec![],
                tokens: None,
                format: Some(OutputFormat::Text),
            },
            &Config::default(),
        )
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_run_text_output() {
        plain();
        let report = run_inputs(
            &parity_dfa(),
            &chars(&["101"]),
            OutputFormat::Text,
            &Config::default(),
        );

        assert!(report.success);
        assert_eq!(
            report.output,
            "=== DFA SIMULATION ===\nInput: 101\nPath: q0 → q1 → q0 → q1\nStatus: ACCEPTED\n"
        );
    }

    #[test]
    fn test_run_reports_failure() {
        plain();
        let report = run_inputs(
            &parity_dfa(),
            &chars(&["110", "2"]),
            OutputFormat::Text,
            &Config::default(),
        );

        assert!(!report.success);
        assert!(report.output.contains("Status: REJECTED"));
        assert!(report
            .output
            .contains("Error: symbol '2' is not in the DFA alphabet"));
    }

    #[test]
    fn test_run_json_output() {
        let report = run_inputs(
            &parity_dfa(),
            &chars(&["10"]),
            OutputFormat::Json,
            &Config::default(),
        );

        let line: serde_json::Value = serde_json::from_str(report.output.trim()).unwrap();
        assert_eq!(line["input"], "10");
        assert_eq!(line["outcome"]["status"], "completed");
        assert_eq!(line["outcome"]["verdict"], "ACCEPTED");
        assert_eq!(line["outcome"]["path"], serde_json::json!(["q0", "q1", "q1"]));
    }

    #[test]
    fn test_input_limit() {
        let mut config = Config::default();
        config.limits.max_input_len = 2;

        let report = run_inputs(
            &parity_dfa(),
            &chars(&["101"]),
            OutputFormat::Json,
            &config,
        );

        assert!(!report.success);
        let line: serde_json::Value = serde_json::from_str(report.output.trim()).unwrap();
        assert_eq!(line["error"]["kind"], "INPUT_TOO_LONG");
    }

    #[test]
    fn test_custom_arrow() {
        plain();
        let outcome = parity_dfa().simulate(&Tokenization::Chars.split("1"));
        assert_eq!(
            render_outcome(&outcome, " -> "),
            "Path: q0 -> q1\nStatus: ACCEPTED"
        );
    }

    #[test]
    fn test_run_defaults_to_test_string() {
        plain();
        let file = write_definition(&serde_json::to_value(parity_dfa().raw()).unwrap());

        let report = run_file(&file).unwrap();
        assert!(report.output.contains("Input: 101"));
        assert!(report.output.contains("Status: ACCEPTED"));
    }

    #[test]
    fn test_run_test_string_symbol_list() {
        plain();
        let file = write_definition(&serde_json::json!({
            "alphabet": ["coin", "push"],
            "start_state": "locked",
            "accept_states": ["unlocked"],
            "transitions": {
                "locked": {"coin": "unlocked", "push": "locked"},
                "unlocked": {"coin": "unlocked", "push": "locked"}
            },
            "test_string": ["push", "coin"]
        }));

        let report = run_file(&file).unwrap();
        assert!(report.success);
        assert!(report.output.contains("Input: push coin"));
        assert!(report
            .output
            .contains("Path: locked → locked → unlocked\nStatus: ACCEPTED"));
    }

    #[test]
    fn test_run_without_test_string() {
        let file = write_definition(&serde_json::json!({
            "alphabet": ["0", "1"],
            "start_state": "q0",
            "accept_states": ["q1"],
            "transitions": {"q0": {"1": "q1"}}
        }));

        let err = run_file(&file).unwrap_err();
        assert!(err.to_string().contains("has no test_string"));
    }

    #[test]
    fn test_summary() {
        plain();
        let summary = format_summary(&parity_dfa());
        assert!(summary.contains("Alphabet: 0, 1"));
        assert!(summary.contains("Start: q0"));
        assert!(summary.contains("Transitions: 4 (complete)"));
        assert!(summary.contains("Test string: 101"));
        assert!(!summary.contains("Meta:"));
    }

    #[test]
    fn test_summary_shows_meta() {
        plain();
        let dfa = Automaton::from_json(&serde_json::json!({
            "alphabet": ["a"],
            "start_state": "s",
            "accept_states": ["s"],
            "transitions": {"s": {"a": "s"}},
            "meta": {"author": "tests"}
        }))
        .unwrap();

        let summary = format_summary(&dfa);
        assert!(summary.contains(r#"Meta: {"author":"tests"}"#));
        assert!(!summary.contains("Test string"));
    }
}
