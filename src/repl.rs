//! Interactive REPL.

use crate::commands::render_outcome;
use crate::config::Config;
use colored::Colorize;
use dfasim_core::{Automaton, State, Symbol, Tokenization};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

const HELP_TEXT: &str = r#"
Type an input string to run it through the DFA.

Available commands:
  :help                 Show this help
  :empty                Run the empty input
  :test                 Run the definition's test_string
  :check                Report structural issues
  :from <state>         List the transitions out of a state
  :tokens chars|whitespace  Change how inputs are split into symbols
  :quit, :exit          Exit the REPL
"#;

/// What the loop should do after a line.
enum Action {
    Print(String),
    Quit,
}

pub fn run(
    automaton: &Automaton,
    tokens: Option<Tokenization>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "dfasim REPL".bold().cyan());
    println!(
        "Loaded DFA with {} states over {{{}}}",
        automaton.states().len(),
        automaton
            .alphabet()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let rl_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(rl_config)?;

    let history_path = config.repl.history_path();
    let _ = rl.load_history(&history_path);

    let mut tokenization = tokens.unwrap_or_else(|| automaton.default_tokenization());

    println!("Type ':help' for available commands.\n");

    loop {
        let prompt = format!("{} ", "dfa>".cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match execute_line(automaton, &mut tokenization, config, line) {
                    Action::Print(output) => println!("{}\n", output),
                    Action::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    if let Err(e) = rl.save_history(&history_path) {
        tracing::warn!("Failed to save history to {}: {}", history_path.display(), e);
    }

    Ok(())
}

fn execute_line(
    automaton: &Automaton,
    tokenization: &mut Tokenization,
    config: &Config,
    line: &str,
) -> Action {
    let Some(command) = line.strip_prefix(':') else {
        return Action::Print(simulate_line(automaton, *tokenization, config, line));
    };

    let parts: Vec<&str> = command.split_whitespace().collect();
    let cmd = parts.first().map(|c| c.to_lowercase()).unwrap_or_default();
    let args = parts.get(1..).unwrap_or_default();

    match cmd.as_str() {
        "help" | "h" | "?" => Action::Print(HELP_TEXT.to_string()),

        "quit" | "exit" | "q" => Action::Quit,

        "empty" | "e" => Action::Print(simulate_line(automaton, *tokenization, config, "")),

        "test" | "t" => match automaton.test_string() {
            Some(test_string) => Action::Print(format!(
                "Input: {}\n{}",
                test_string.to_string().cyan(),
                simulate_symbols(automaton, config, &test_string.symbols(*tokenization))
            )),
            None => Action::Print("Definition has no test_string".yellow().to_string()),
        },

        "check" | "c" => {
            let diagnostics = automaton.check();
            if diagnostics.is_empty() {
                return Action::Print("No issues found".green().to_string());
            }
            let lines: Vec<String> = diagnostics
                .iter()
                .map(|d| format!("{}: {}", "warning".yellow(), d))
                .collect();
            Action::Print(lines.join("\n"))
        }

        "from" | "f" => match args.first() {
            Some(name) => {
                let state = State::from(*name);
                if !automaton.has_state(&state) {
                    return Action::Print(format!("{}: unknown state '{}'", "Error".red(), state));
                }
                let lines: Vec<String> = automaton
                    .symbols_from(&state)
                    .into_iter()
                    .filter_map(|symbol| {
                        automaton
                            .get_transition(&state, symbol)
                            .map(|to| format!("  {} {} {}", symbol, config.output.arrow.trim(), to))
                    })
                    .collect();
                if lines.is_empty() {
                    Action::Print(format!("State '{}' has no transitions", state))
                } else {
                    Action::Print(lines.join("\n"))
                }
            }
            None => Action::Print("Usage: :from <state>".to_string()),
        },

        "tokens" => match args.first().copied() {
            Some("chars") => {
                *tokenization = Tokenization::Chars;
                Action::Print(format!("{} chars", "Tokens:".green()))
            }
            Some("whitespace") => {
                *tokenization = Tokenization::Whitespace;
                Action::Print(format!("{} whitespace", "Tokens:".green()))
            }
            _ => Action::Print("Usage: :tokens chars|whitespace".to_string()),
        },

        _ => Action::Print(format!(
            "Unknown command: {}. Type ':help' for help.",
            cmd
        )),
    }
}

fn simulate_line(
    automaton: &Automaton,
    tokenization: Tokenization,
    config: &Config,
    input: &str,
) -> String {
    simulate_symbols(automaton, config, &tokenization.split(input))
}

fn simulate_symbols(automaton: &Automaton, config: &Config, symbols: &[Symbol]) -> String {
    if !config.limits.allows(symbols.len()) {
        return format!(
            "{}: input has {} symbols, exceeding the limit of {}",
            "Error".red(),
            symbols.len(),
            config.limits.max_input_len
        );
    }
    render_outcome(&automaton.simulate(symbols), &config.output.arrow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parity_dfa() -> Automaton {
        Automaton::from_json(&serde_json::json!({
            "alphabet": ["0", "1"],
            "start_state": "q0",
            "accept_states": ["q1"],
            "transitions": {
                "q0": {"0": "q0", "1": "q1"},
                "q1": {"0": "q1", "1": "q0"}
            }
        }))
        .unwrap()
    }

    fn printed(action: Action) -> String {
        match action {
            Action::Print(s) => s,
            Action::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_input_line() {
        colored::control::set_override(false);
        let dfa = parity_dfa();
        let mut tokens = Tokenization::Chars;
        let config = Config::default();

        let out = printed(execute_line(&dfa, &mut tokens, &config, "11"));
        assert_eq!(out, "Path: q0 → q1 → q0\nStatus: REJECTED");

        let out = printed(execute_line(&dfa, &mut tokens, &config, ":empty"));
        assert_eq!(out, "Path: q0\nStatus: REJECTED");
    }

    #[test]
    fn test_commands() {
        colored::control::set_override(false);
        let dfa = parity_dfa();
        let mut tokens = Tokenization::Chars;
        let config = Config::default();

        let out = printed(execute_line(&dfa, &mut tokens, &config, ":tokens whitespace"));
        assert!(out.contains("whitespace"));
        assert_eq!(tokens, Tokenization::Whitespace);

        let out = printed(execute_line(&dfa, &mut tokens, &config, "1 0"));
        assert!(out.ends_with("Status: ACCEPTED"));

        let out = printed(execute_line(&dfa, &mut tokens, &config, ":test"));
        assert_eq!(out, "Definition has no test_string");

        let out = printed(execute_line(&dfa, &mut tokens, &config, ":check"));
        assert_eq!(out, "No issues found");

        assert!(matches!(
            execute_line(&dfa, &mut tokens, &config, ":quit"),
            Action::Quit
        ));
    }

    #[test]
    fn test_test_string_symbol_list() {
        colored::control::set_override(false);
        let dfa = Automaton::from_json(&serde_json::json!({
            "alphabet": ["coin", "push"],
            "start_state": "locked",
            "accept_states": ["unlocked"],
            "transitions": {
                "locked": {"coin": "unlocked", "push": "locked"},
                "unlocked": {"coin": "unlocked", "push": "locked"}
            },
            "test_string": ["push", "coin"]
        }))
        .unwrap();
        // The list is used as is, even when inputs are split per character.
        let mut tokens = Tokenization::Chars;

        let out = printed(execute_line(&dfa, &mut tokens, &Config::default(), ":test"));
        assert_eq!(
            out,
            "Input: push coin\nPath: locked → locked → unlocked\nStatus: ACCEPTED"
        );
    }

    #[test]
    fn test_from_lists_transitions() {
        colored::control::set_override(false);
        let dfa = Automaton::from_json(&serde_json::json!({
            "alphabet": ["0", "1"],
            "start_state": "q0",
            "accept_states": ["q1"],
            "transitions": {"q0": {"0": "q0", "1": "q1"}}
        }))
        .unwrap();
        let mut tokens = Tokenization::Chars;
        let config = Config::default();

        let out = printed(execute_line(&dfa, &mut tokens, &config, ":from q0"));
        assert_eq!(out, "  0 → q0\n  1 → q1");

        let out = printed(execute_line(&dfa, &mut tokens, &config, ":from q1"));
        assert_eq!(out, "State 'q1' has no transitions");

        let out = printed(execute_line(&dfa, &mut tokens, &config, ":from nowhere"));
        assert_eq!(out, "Error: unknown state 'nowhere'");

        let out = printed(execute_line(&dfa, &mut tokens, &config, ":from"));
        assert_eq!(out, "Usage: :from <state>");
    }
}
