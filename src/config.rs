use crate::calculator::CalculatorConfig;
use crate::evaluator::{DEFAULT_MAX_EXPONENT, DEFAULT_MAX_RESULT_BITS};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

/// Settings gathered from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub file: Option<String>,
    pub interactive: bool,
    pub verbose: bool,
    pub calculator: CalculatorConfig,
}

pub fn command() -> Command {
    Command::new("smartcalc")
        .about("An arbitrary-precision integer calculator with variables")
        .arg(
            Arg::new("file")
                .help("A file of calculator lines to evaluate")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-exponent")
                .long("max-exponent")
                .value_name("N")
                .help("Largest exponent accepted by `^`")
                .value_parser(value_parser!(u32))
                .default_value("1000000"),
        )
        .arg(
            Arg::new("max-result-bits")
                .long("max-result-bits")
                .value_name("BITS")
                .help("Largest result, in bits, that `^` may produce")
                .value_parser(value_parser!(u64))
                .default_value("16000000"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log evaluation details to stderr")
                .action(ArgAction::SetTrue),
        )
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let max_exponent = matches
            .get_one::<u32>("max-exponent")
            .copied()
            .unwrap_or(DEFAULT_MAX_EXPONENT);
        let max_result_bits = matches
            .get_one::<u64>("max-result-bits")
            .copied()
            .unwrap_or(DEFAULT_MAX_RESULT_BITS);

        Self {
            file: matches.get_one::<String>("file").cloned(),
            interactive: matches.get_flag("interactive"),
            verbose: matches.get_flag("verbose"),
            calculator: CalculatorConfig {
                max_exponent,
                max_result_bits,
            },
        }
    }

    pub fn from_args() -> Self {
        Self::from_matches(&command().get_matches())
    }
}
