use crate::error::{CalcError, ErrorKind, Span};
use crate::lexer::{Operator, Token, TokenType};
use tracing::trace;

/// Shunting-yard conversion from infix tokens to postfix order.
///
/// A parser is consumed by [`Parser::parse`], so no operator stack or
/// output outlives a single expression.
pub struct Parser {
    tokens: Vec<Token>,
    output: Vec<Token>,
    operators: Vec<Token>,
    expect_operand: bool,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            output: Vec::new(),
            operators: Vec::new(),
            expect_operand: true,
        }
    }

    pub fn parse(mut self) -> Result<Vec<Token>, CalcError> {
        let tokens = std::mem::take(&mut self.tokens);

        for token in tokens {
            match token.token_type {
                TokenType::Operand(_) => {
                    self.output.push(token);
                    self.expect_operand = false;
                }
                TokenType::Operator(Operator::LeftParen) => {
                    self.operators.push(token);
                    self.expect_operand = true;
                }
                TokenType::Operator(Operator::RightParen) => {
                    self.close_group(token.span)?;
                    self.expect_operand = false;
                }
                TokenType::Operator(op) if self.expect_operand && is_sign(op) => {
                    // Prefix sign: `+` is a no-op, `-` negates what follows.
                    if op == Operator::Minus {
                        self.operators
                            .push(Token::operator(Operator::Negate, token.span));
                    }
                }
                TokenType::Operator(op) => {
                    self.pop_while_at_least(op.precedence());
                    self.operators.push(token);
                    self.expect_operand = true;
                }
            }
        }

        while let Some(top) = self.operators.pop() {
            if top.token_type == TokenType::Operator(Operator::LeftParen) {
                return Err(CalcError::new_with_help(
                    ErrorKind::InvalidExpression,
                    top.span,
                    "this parenthesis is never closed".to_string(),
                ));
            }
            self.output.push(top);
        }

        trace!(
            postfix = %self
                .output
                .iter()
                .map(|t| t.lexeme())
                .collect::<Vec<_>>()
                .join(" "),
            "converted to postfix"
        );

        Ok(self.output)
    }

    fn close_group(&mut self, span: Span) -> Result<(), CalcError> {
        while let Some(top) = self.operators.pop() {
            if top.token_type == TokenType::Operator(Operator::LeftParen) {
                return Ok(());
            }
            self.output.push(top);
        }

        Err(CalcError::new_with_help(
            ErrorKind::InvalidExpression,
            span,
            "no matching `(` for this parenthesis".to_string(),
        ))
    }

    fn pop_while_at_least(&mut self, precedence: i32) {
        while let Some(top) = self.operators.last() {
            if top.precedence() < precedence {
                break;
            }
            if let Some(top) = self.operators.pop() {
                self.output.push(top);
            }
        }
    }
}

fn is_sign(op: Operator) -> bool {
    matches!(op, Operator::Plus | Operator::Minus)
}

/// Convert a validated, whitespace-free expression to postfix tokens.
pub fn to_postfix(source: &str) -> Result<Vec<Token>, CalcError> {
    Parser::new(crate::lexer::tokenize(source)).parse()
}
