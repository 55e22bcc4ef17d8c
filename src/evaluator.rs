use crate::error::{CalcError, Span};
use crate::lexer::{Operator, Token, TokenType};
use crate::value::resolve;
use crate::variables::Variables;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use tracing::trace;

/// Default cap on the right-hand side of `^`.
pub const DEFAULT_MAX_EXPONENT: u32 = 1_000_000;

/// Default cap on the estimated size of a `^` result, in bits.
pub const DEFAULT_MAX_RESULT_BITS: u64 = 16_000_000;

/// Walks a postfix sequence with an operand stack.
pub struct Evaluator {
    max_exponent: u32,
    max_result_bits: u64,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_EXPONENT, DEFAULT_MAX_RESULT_BITS)
    }

    pub fn with_limits(max_exponent: u32, max_result_bits: u64) -> Self {
        Self {
            max_exponent,
            max_result_bits,
        }
    }

    pub fn evaluate(&self, postfix: &[Token], variables: &Variables) -> Result<BigInt, CalcError> {
        let mut stack: Vec<(BigInt, Span)> = Vec::new();

        for token in postfix {
            match &token.token_type {
                TokenType::Operand(text) => {
                    stack.push((resolve(text, variables, token.span)?, token.span));
                }
                TokenType::Operator(Operator::Negate) => {
                    let (value, span) = pop(&mut stack, token.span)?;
                    stack.push((-value, token.span.join(&span)));
                }
                TokenType::Operator(op) => {
                    let (right, right_span) = pop(&mut stack, token.span)?;
                    let (left, left_span) = pop(&mut stack, token.span)?;
                    let result = self.evaluate_binary_op(*op, left, right, token.span, right_span)?;
                    trace!(operator = op.symbol(), %result, "applied operator");
                    stack.push((result, left_span.join(&right_span)));
                }
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some((value, _)), true) => Ok(value),
            (Some((_, span)), false) => Err(CalcError::invalid_expression(span)),
            (None, _) => Err(CalcError::invalid_expression(Span::single(0))),
        }
    }

    fn evaluate_binary_op(
        &self,
        operator: Operator,
        left: BigInt,
        right: BigInt,
        span: Span,
        right_span: Span,
    ) -> Result<BigInt, CalcError> {
        match operator {
            Operator::Plus => Ok(left + right),
            Operator::Minus => Ok(left - right),
            Operator::Star => Ok(left * right),
            Operator::Slash => {
                if right.is_zero() {
                    Err(CalcError::division_by_zero(span.join(&right_span)))
                } else {
                    // Truncates toward zero.
                    Ok(left / right)
                }
            }
            Operator::Caret => {
                let exponent = right
                    .to_u32()
                    .filter(|e| *e <= self.max_exponent)
                    .ok_or_else(|| CalcError::arithmetic_range(right_span, self.max_exponent))?;

                // |left|^e needs at most bits(left) * e bits.
                let estimated_bits = left.bits().saturating_mul(u64::from(exponent));
                if estimated_bits > self.max_result_bits {
                    return Err(CalcError::result_too_large(
                        span.join(&right_span),
                        self.max_result_bits,
                    ));
                }
                Ok(left.pow(exponent))
            }
            Operator::LeftParen | Operator::RightParen | Operator::Negate => {
                Err(CalcError::unknown_operator(span))
            }
        }
    }
}

fn pop(stack: &mut Vec<(BigInt, Span)>, at: Span) -> Result<(BigInt, Span), CalcError> {
    stack.pop().ok_or_else(|| CalcError::invalid_expression(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::to_postfix;

    fn eval(source: &str) -> Result<BigInt, CalcError> {
        let postfix = to_postfix(source)?;
        Evaluator::new().evaluate(&postfix, &Variables::new())
    }

    fn eval_ok(source: &str) -> String {
        eval(source).unwrap().to_string()
    }

    fn eval_err(source: &str) -> ErrorKind {
        eval(source).unwrap_err().kind
    }

    #[test]
    fn arithmetic() {
        assert_eq!(eval_ok("2+3*4"), "14");
        assert_eq!(eval_ok("(2+3)*4"), "20");
        assert_eq!(eval_ok("10-4-3"), "3");
        assert_eq!(eval_ok("100/10/5"), "2");
        assert_eq!(eval_ok("2^10"), "1024");
        assert_eq!(eval_ok("3-5"), "-2");
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(eval_ok("7/2"), "3");
        assert_eq!(eval_ok("-7/2"), "-3");
        assert_eq!(eval_ok("7/-2"), "-3");
    }

    #[test]
    fn negation() {
        assert_eq!(eval_ok("-5"), "-5");
        assert_eq!(eval_ok("2*-3"), "-6");
        assert_eq!(eval_ok("-(1+2)*2"), "-6");
        assert_eq!(eval_ok("-2^2"), "4");
    }

    #[test]
    fn big_results_are_exact() {
        assert_eq!(
            eval_ok("2^100"),
            "1267650600228229401496703205376"
        );
        assert_eq!(
            eval_ok("99999999999999999999*99999999999999999999"),
            "9999999999999999999800000000000000000001"
        );
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval_err("1/0"), ErrorKind::DivisionByZero);
        assert_eq!(eval_err("1/(2-2)"), ErrorKind::DivisionByZero);
    }

    #[test]
    fn exponent_range() {
        assert_eq!(eval_err("2^-1"), ErrorKind::ArithmeticRange);
        assert_eq!(eval_err("2^99999999999"), ErrorKind::ArithmeticRange);
        assert_eq!(eval_ok("0^0"), "1");

        let postfix = to_postfix("2^11").unwrap();
        let err = Evaluator::with_limits(10, DEFAULT_MAX_RESULT_BITS)
            .evaluate(&postfix, &Variables::new())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArithmeticRange);
        assert_eq!(err.span, Span::new(2, 4));
    }

    #[test]
    fn power_result_size_is_capped() {
        // Each exponent is in range, the result would not fit the bit budget.
        assert_eq!(eval_err("(2^1000000)^1000000"), ErrorKind::ArithmeticRange);
        assert_eq!(eval_err("(2^1000000)^64"), ErrorKind::ArithmeticRange);
        assert_eq!(eval_err("(10^100000)^100"), ErrorKind::ArithmeticRange);

        let postfix = to_postfix("1^1000000").unwrap();
        assert_eq!(
            Evaluator::new().evaluate(&postfix, &Variables::new()).unwrap(),
            BigInt::from(1)
        );

        let postfix = to_postfix("16^4").unwrap();
        let err = Evaluator::with_limits(DEFAULT_MAX_EXPONENT, 16)
            .evaluate(&postfix, &Variables::new())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArithmeticRange);
        assert_eq!(err.span, Span::new(2, 4));
        assert_eq!(
            Evaluator::with_limits(DEFAULT_MAX_EXPONENT, 20)
                .evaluate(&postfix, &Variables::new())
                .unwrap(),
            BigInt::from(65536)
        );
    }

    #[test]
    fn malformed_postfix() {
        assert_eq!(eval_err("2+"), ErrorKind::InvalidExpression);
        assert_eq!(eval_err("*2"), ErrorKind::InvalidExpression);
        assert_eq!(eval_err("(2)(3)"), ErrorKind::InvalidExpression);
    }

    #[test]
    fn stray_parenthesis_is_unknown_operator() {
        let postfix = vec![
            Token::operand("1", Span::single(0)),
            Token::operand("2", Span::single(1)),
            Token::operator(Operator::LeftParen, Span::single(2)),
        ];
        let err = Evaluator::new()
            .evaluate(&postfix, &Variables::new())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownOperator);
    }

    #[test]
    fn variables_are_resolved() {
        let mut vars = Variables::new();
        vars.assign("a", BigInt::from(6));
        vars.assign("b", BigInt::from(7));
        let postfix = to_postfix("a*b").unwrap();
        assert_eq!(
            Evaluator::new().evaluate(&postfix, &vars).unwrap(),
            BigInt::from(42)
        );

        let postfix = to_postfix("a*c").unwrap();
        let err = Evaluator::new().evaluate(&postfix, &vars).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownVariable);
        assert_eq!(err.span, Span::new(2, 3));
    }
}
