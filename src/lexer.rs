use crate::error::Span;

/// Precedence returned for anything that is not an operator.
pub const NOT_AN_OPERATOR: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
    /// Prefix minus, produced by the converter, never by the lexer.
    Negate,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            '*' => Some(Operator::Star),
            '/' => Some(Operator::Slash),
            '^' => Some(Operator::Caret),
            '(' => Some(Operator::LeftParen),
            ')' => Some(Operator::RightParen),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Caret => "^",
            Operator::LeftParen => "(",
            Operator::RightParen => ")",
            Operator::Negate => "neg",
        }
    }

    pub const fn precedence(&self) -> i32 {
        match self {
            Operator::LeftParen | Operator::RightParen => 0,
            Operator::Plus | Operator::Minus => 1,
            Operator::Star | Operator::Slash => 2,
            Operator::Caret => 3,
            Operator::Negate => 4,
        }
    }
}

pub fn is_operator_char(c: char) -> bool {
    Operator::from_char(c).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    /// A numeric literal or a variable name, unresolved.
    Operand(String),
    Operator(Operator),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, span: Span) -> Self {
        Self { token_type, span }
    }

    pub fn operand(text: &str, span: Span) -> Self {
        Self::new(TokenType::Operand(text.to_string()), span)
    }

    pub fn operator(op: Operator, span: Span) -> Self {
        Self::new(TokenType::Operator(op), span)
    }

    /// Operator precedence, or [`NOT_AN_OPERATOR`] for operands.
    pub fn precedence(&self) -> i32 {
        match self.token_type {
            TokenType::Operator(op) => op.precedence(),
            TokenType::Operand(_) => NOT_AN_OPERATOR,
        }
    }

    pub fn lexeme(&self) -> &str {
        match &self.token_type {
            TokenType::Operand(text) => text,
            TokenType::Operator(op) => op.symbol(),
        }
    }
}

/// Splits a normalized line into operands and single-character operators.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }
        self.tokens
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) {
        let c = self.advance();

        if let Some(op) = Operator::from_char(c) {
            self.tokens
                .push(Token::operator(op, Span::new(self.start, self.current)));
            return;
        }

        while let Some(next) = self.peek() {
            if is_operator_char(next) {
                break;
            }
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        self.tokens
            .push(Token::operand(text, Span::new(self.start, self.current)));
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current..].chars().next().unwrap_or('\0');
        self.current += c.len_utf8();
        c
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }
}

pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).scan_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(source: &str) -> Vec<String> {
        tokenize(source)
            .iter()
            .map(|t| t.lexeme().to_string())
            .collect()
    }

    #[test]
    fn precedence_table() {
        let precedences: Vec<i32> = tokenize("()+-*/^x12")
            .iter()
            .map(|t| t.precedence())
            .collect();
        assert_eq!(precedences, vec![0, 0, 1, 1, 2, 2, 3, NOT_AN_OPERATOR]);
        assert_eq!(Operator::Negate.precedence(), 4);
    }

    #[test]
    fn operands_are_maximal_runs() {
        assert_eq!(lexemes("12+abc*(3-4)"), vec!["12", "+", "abc", "*", "(", "3", "-", "4", ")"]);
    }

    #[test]
    fn spans_point_into_source() {
        let tokens = tokenize("10^b");
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(2, 3));
        assert_eq!(tokens[2].span, Span::new(3, 4));
    }

    #[test]
    fn empty_line_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }
}
