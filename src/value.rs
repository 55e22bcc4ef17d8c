use crate::error::{CalcError, Span};
use crate::variables::Variables;
use num_bigint::BigInt;

/// Optional sign followed by one or more ASCII digits.
pub fn is_integer_literal(text: &str) -> bool {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// One or more ASCII letters.
pub fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Resolve an operand to its integer value.
///
/// Literals are parsed exactly; anything else must name a bound variable.
pub fn resolve(token: &str, variables: &Variables, span: Span) -> Result<BigInt, CalcError> {
    if is_integer_literal(token) {
        if let Ok(value) = token.parse::<BigInt>() {
            return Ok(value);
        }
    }

    variables
        .get(token)
        .cloned()
        .ok_or_else(|| CalcError::unknown_variable(span, token))
}
