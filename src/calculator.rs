use crate::error::{CalcError, Span};
use crate::evaluator::{Evaluator, DEFAULT_MAX_EXPONENT, DEFAULT_MAX_RESULT_BITS};
use crate::lexer::is_operator_char;
use crate::parser::to_postfix;
use crate::validator::{classify, LineShape};
use crate::value::resolve;
use crate::variables::Variables;
use num_bigint::BigInt;
use std::fmt;
use tracing::debug;

/// Engine limits for a calculator session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorConfig {
    pub max_exponent: u32,
    /// Upper bound on the estimated bit length of a `^` result.
    pub max_result_bits: u64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_exponent: DEFAULT_MAX_EXPONENT,
            max_result_bits: DEFAULT_MAX_RESULT_BITS,
        }
    }
}

/// What a single command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A value to print.
    Value(BigInt),
    /// The command succeeded and has nothing to print.
    Silent,
    Error(CalcError),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

impl From<Result<Option<BigInt>, CalcError>> for Outcome {
    fn from(result: Result<Option<BigInt>, CalcError>) -> Self {
        match result {
            Ok(Some(value)) => Outcome::Value(value),
            Ok(None) => Outcome::Silent,
            Err(error) => Outcome::Error(error),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Value(value) => write!(f, "{}", value),
            Outcome::Silent => Ok(()),
            Outcome::Error(error) => write!(f, "{}", error),
        }
    }
}

/// One evaluation session: owns its variables, shares nothing.
pub struct Calculator {
    variables: Variables,
    evaluator: Evaluator,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            variables: Variables::new(),
            evaluator: Evaluator::with_limits(config.max_exponent, config.max_result_bits),
        }
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Run one normalized line.
    pub fn execute(&mut self, line: &str) -> Outcome {
        let outcome = Outcome::from(self.run(line));
        debug!(line, outcome = %outcome, "executed");
        outcome
    }

    fn run(&mut self, line: &str) -> Result<Option<BigInt>, CalcError> {
        if let Some(pos) = line.find("**").or_else(|| line.find("//")) {
            return Err(CalcError::invalid_expression(Span::new(pos, pos + 2)));
        }

        match classify(line)? {
            LineShape::Assignment {
                name,
                value,
                value_span,
            } => {
                let value = resolve(value, &self.variables, value_span)?;
                self.variables.assign(name, value);
                Ok(None)
            }
            LineShape::Reference {
                name,
                source,
                source_span,
            } => {
                self.variables.reference(name, source, source_span)?;
                Ok(None)
            }
            LineShape::Value => {
                let value = resolve(line, &self.variables, Span::new(0, line.len()))?;
                Ok(Some(value))
            }
            LineShape::Expression => {
                debug_assert!(line.chars().any(is_operator_char));
                let postfix = to_postfix(line)?;
                if postfix.is_empty() {
                    return Ok(None);
                }
                let value = self.evaluator.evaluate(&postfix, &self.variables)?;
                Ok(Some(value))
            }
        }
    }
}
