use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn join(&self, other: &Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// The fixed set of failures a command can end in.
///
/// The `Display` text of each kind is exactly what the REPL prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("Unknown operator")]
    UnknownOperator,
    #[error("Unknown variable")]
    UnknownVariable,
    #[error("Invalid identifier")]
    InvalidIdentifier,
    #[error("Invalid assignment")]
    InvalidAssignment,
    #[error("Invalid expression")]
    InvalidExpression,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Exponent out of range")]
    ArithmeticRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcError {
    pub kind: ErrorKind,
    pub span: Span,
    pub help: Option<String>,
}

impl CalcError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, help: String) -> Self {
        Self {
            kind,
            span,
            help: Some(help),
        }
    }

    pub fn unknown_operator(span: Span) -> Self {
        Self::new(ErrorKind::UnknownOperator, span)
    }

    pub fn unknown_variable(span: Span, name: &str) -> Self {
        Self::new_with_help(
            ErrorKind::UnknownVariable,
            span,
            format!("assign a value first, e.g. `{} = 1`", name),
        )
    }

    pub fn invalid_identifier(span: Span) -> Self {
        Self::new_with_help(
            ErrorKind::InvalidIdentifier,
            span,
            "names are made of ASCII letters only, numbers of digits only".to_string(),
        )
    }

    pub fn invalid_assignment(span: Span) -> Self {
        Self::new_with_help(
            ErrorKind::InvalidAssignment,
            span,
            "use `name = number` or `name = other_name`".to_string(),
        )
    }

    pub fn invalid_expression(span: Span) -> Self {
        Self::new(ErrorKind::InvalidExpression, span)
    }

    pub fn division_by_zero(span: Span) -> Self {
        Self::new(ErrorKind::DivisionByZero, span)
    }

    pub fn arithmetic_range(span: Span, max_exponent: u32) -> Self {
        Self::new_with_help(
            ErrorKind::ArithmeticRange,
            span,
            format!("exponents must be between 0 and {}", max_exponent),
        )
    }

    pub fn result_too_large(span: Span, max_result_bits: u64) -> Self {
        Self::new_with_help(
            ErrorKind::ArithmeticRange,
            span,
            format!("the result would need more than {} bits", max_result_bits),
        )
    }

    /// Print an annotated diagnostic for this error to stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");

        let color = match self.kind {
            ErrorKind::InvalidIdentifier | ErrorKind::InvalidAssignment => Color::Red,
            ErrorKind::InvalidExpression | ErrorKind::UnknownOperator => Color::Yellow,
            ErrorKind::UnknownVariable
            | ErrorKind::DivisionByZero
            | ErrorKind::ArithmeticRange => Color::Magenta,
        };

        // Clamp so a span at end of line still lands inside the source.
        let end = self.span.end.min(source.len());
        let start = self.span.start.min(end);

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}", self.kind.fg(color)))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(self.kind.to_string())
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        // Failing to write a diagnostic to stderr leaves nothing useful to do.
        let _ = report_builder
            .finish()
            .eprint((filename, Source::from(source)));
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for CalcError {}
