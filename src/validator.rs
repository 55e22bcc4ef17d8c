//! Structural checks on a normalized line, run before any tokens are
//! converted or evaluated.

use crate::error::{CalcError, Span};
use crate::lexer::{tokenize, TokenType};
use crate::value::{is_identifier, is_integer_literal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineShape<'a> {
    /// A single literal or variable name with no operators.
    Value,
    /// Operands joined by operators and parentheses.
    Expression,
    /// `name=literal`
    Assignment {
        name: &'a str,
        value: &'a str,
        value_span: Span,
    },
    /// `name=other`
    Reference {
        name: &'a str,
        source: &'a str,
        source_span: Span,
    },
}

pub fn classify(line: &str) -> Result<LineShape<'_>, CalcError> {
    match line.find('=') {
        Some(eq) => classify_assignment(line, eq),
        None => classify_value(line),
    }
}

fn is_operand(text: &str) -> bool {
    is_identifier(text) || text.bytes().all(|b| b.is_ascii_digit())
}

/// A bare value is one run of letters and digits; `resolve` decides whether
/// it names anything.
fn is_bare_value(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn classify_value(line: &str) -> Result<LineShape<'_>, CalcError> {
    if is_bare_value(line) {
        return Ok(LineShape::Value);
    }
    // `-a1` resolves as one value; `-a` and `-5` stay negations.
    if let Some(body) = line.strip_prefix('-') {
        if is_bare_value(body) && !is_operand(body) {
            return Ok(LineShape::Value);
        }
    }

    let tokens = tokenize(line);
    let mut operands = 0;
    let mut has_operator = false;

    for token in &tokens {
        match &token.token_type {
            TokenType::Operand(text) => {
                if !is_operand(text) {
                    return Err(CalcError::invalid_identifier(token.span));
                }
                operands += 1;
            }
            TokenType::Operator(_) => has_operator = true,
        }
    }

    if operands == 0 {
        return Err(CalcError::invalid_identifier(Span::new(0, line.len())));
    }

    if has_operator {
        Ok(LineShape::Expression)
    } else {
        Ok(LineShape::Value)
    }
}

fn classify_assignment(line: &str, eq: usize) -> Result<LineShape<'_>, CalcError> {
    let name = &line[..eq];
    let rhs_start = eq + 1;
    let rhs = &line[rhs_start..];
    let rhs_span = Span::new(rhs_start, line.len());

    if !is_identifier(name) {
        return Err(CalcError::invalid_assignment(Span::new(0, eq.max(1))));
    }

    if is_integer_literal(rhs) {
        return Ok(LineShape::Assignment {
            name,
            value: rhs,
            value_span: rhs_span,
        });
    }

    if is_identifier(rhs) {
        return Ok(LineShape::Reference {
            name,
            source: rhs,
            source_span: rhs_span,
        });
    }

    let span = if rhs.is_empty() {
        Span::single(eq)
    } else {
        rhs_span
    };
    Err(CalcError::invalid_assignment(span))
}
