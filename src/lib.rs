// Smart Calculator Library
//
// An arbitrary-precision integer calculator: lines are validated, converted
// to postfix with the shunting-yard algorithm and evaluated against a
// per-session variable store.

// Public modules
pub mod calculator;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod validator;
pub mod value;
pub mod variables;

use std::sync::Once;

// Re-export commonly used items
pub use calculator::{Calculator, CalculatorConfig, Outcome};
pub use config::Config;
pub use error::{CalcError, ErrorKind, Span};
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Operator, Token, TokenType};
pub use parser::{to_postfix, Parser};
pub use variables::Variables;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber.
///
/// Honors `RUST_LOG` (e.g. `RUST_LOG=smartcalc=trace`); `verbose` turns on
/// debug output when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match std::env::var("RUST_LOG") {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) if verbose => EnvFilter::new("smartcalc=debug"),
            Err(_) => return,
        };

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
