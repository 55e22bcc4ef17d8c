use crate::calculator::{Calculator, CalculatorConfig, Outcome};
use std::io::{self, BufRead, Write};
use tracing::warn;

pub const HELP_TEXT: &str = "\
Smart Calculator evaluates integer expressions of any size.
Operators: + - * / ^ and parentheses, e.g. 3 + 8 * ((4 + 3) * 2 + 1) - 6 / (2 + 1)
Division truncates toward zero. Repeated signs collapse: 2 -- 2 is 2 + 2.
Variables are made of Latin letters: a = 10, then b = a, then a + b.
Commands: /help shows this text, /exit quits.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Unknown,
}

impl Command {
    /// Match a `/` line against the known commands.
    ///
    /// Any fragment of a command name is accepted, so `/h` and `/` are help.
    pub fn parse(line: &str) -> Command {
        if "/help".contains(line) {
            Command::Help
        } else if "/exit".contains(line) {
            Command::Exit
        } else {
            Command::Unknown
        }
    }
}

/// Strip all whitespace and collapse each run of `+`/`-` into one sign.
pub fn normalize(line: &str) -> String {
    let mut normalized = String::with_capacity(line.len());
    let mut sign: Option<bool> = None;

    for c in line.chars().filter(|c| !c.is_whitespace()) {
        match c {
            '+' => sign = Some(sign.unwrap_or(false)),
            '-' => sign = Some(!sign.unwrap_or(false)),
            _ => {
                if let Some(negative) = sign.take() {
                    normalized.push(if negative { '-' } else { '+' });
                }
                normalized.push(c);
            }
        }
    }

    if let Some(negative) = sign {
        normalized.push(if negative { '-' } else { '+' });
    }

    normalized
}

/// Result of handing one raw input line to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    Skip,
    Help,
    Exit,
    UnknownCommand,
    /// The normalized line and what the calculator made of it.
    Evaluated(String, Outcome),
}

pub fn process_line(raw: &str, calculator: &mut Calculator) -> LineAction {
    let line = raw.trim();
    if line.is_empty() {
        return LineAction::Skip;
    }

    if line.starts_with('/') {
        return match Command::parse(line) {
            Command::Help => LineAction::Help,
            Command::Exit => LineAction::Exit,
            Command::Unknown => LineAction::UnknownCommand,
        };
    }

    let normalized = normalize(line);
    let outcome = calculator.execute(&normalized);
    LineAction::Evaluated(normalized, outcome)
}

/// Drive a session from `input`, writing everything the user sees to `output`.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    calculator: &mut Calculator,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match process_line(&line, calculator) {
            LineAction::Skip => {}
            LineAction::Help => writeln!(output, "{}", HELP_TEXT)?,
            LineAction::Exit => {
                writeln!(output, "Bye!")?;
                return Ok(());
            }
            LineAction::UnknownCommand => writeln!(output, "Unknown command")?,
            LineAction::Evaluated(_, Outcome::Silent) => {}
            LineAction::Evaluated(_, outcome) => writeln!(output, "{}", outcome)?,
        }
        output.flush()?;
    }

    // EOF ends the session like /exit.
    writeln!(output, "Bye!")
}

pub fn start(config: CalculatorConfig) {
    start_with(Calculator::with_config(config));
}

/// Run the REPL on stdin/stdout, continuing an existing session.
pub fn start_with(mut calculator: Calculator) {
    let stdin = io::stdin();
    let stdout = io::stdout();

    if let Err(error) = run_session(stdin.lock(), &mut stdout.lock(), &mut calculator) {
        warn!(%error, "input/output failed");
        eprintln!("Error reading input: {}", error);
    }
}
