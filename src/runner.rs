use crate::calculator::{Calculator, CalculatorConfig, Outcome};
use crate::repl::{process_line, LineAction, HELP_TEXT};
use tracing::info;

/// Summary of a script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub evaluated: usize,
    pub errors: usize,
}

/// Evaluate every line of `source` in one session.
///
/// Values go to stdout; failures are reported against the normalized line
/// they came from.
pub fn run(source: &str, filename: Option<&str>, config: CalculatorConfig) -> RunStats {
    run_with(source, filename, &mut Calculator::with_config(config))
}

/// Like [`run`], but evaluates into an existing session.
pub fn run_with(source: &str, filename: Option<&str>, calculator: &mut Calculator) -> RunStats {
    let filename = filename.unwrap_or("<input>");
    let mut stats = RunStats::default();

    for (index, raw) in source.lines().enumerate() {
        match process_line(raw, calculator) {
            LineAction::Skip => {}
            LineAction::Help => println!("{}", HELP_TEXT),
            LineAction::Exit => break,
            LineAction::UnknownCommand => {
                stats.errors += 1;
                eprintln!("{}:{}: Unknown command", filename, index + 1);
            }
            LineAction::Evaluated(normalized, outcome) => {
                stats.evaluated += 1;
                match outcome {
                    Outcome::Value(value) => println!("{}", value),
                    Outcome::Silent => {}
                    Outcome::Error(error) => {
                        stats.errors += 1;
                        let location = format!("{}:{}", filename, index + 1);
                        error.report(&normalized, Some(&location));
                    }
                }
            }
        }
    }

    info!(
        file = filename,
        evaluated = stats.evaluated,
        errors = stats.errors,
        "script finished"
    );
    stats
}
