//! Property-based tests for the calculator engine.

use num_bigint::BigInt;
use proptest::prelude::*;
use smartcalc::calculator::{Calculator, Outcome};
use smartcalc::error::ErrorKind;
use smartcalc::repl::normalize;

fn literal_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("-?[1-9][0-9]{0,60}|0").expect("valid regex")
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z]{1,8}").expect("valid regex")
}

fn error_kind(outcome: &Outcome) -> Option<ErrorKind> {
    match outcome {
        Outcome::Error(err) => Some(err.kind),
        _ => None,
    }
}

proptest! {
    #[test]
    fn literal_evaluates_to_itself(text in literal_strategy()) {
        let mut calculator = Calculator::new();
        let expected: BigInt = text.parse().unwrap();
        prop_assert_eq!(calculator.execute(&text), Outcome::Value(expected));
    }

    #[test]
    fn assignment_then_reference_round_trips(
        a in name_strategy(),
        b in name_strategy(),
        text in literal_strategy(),
    ) {
        let mut calculator = Calculator::new();
        let expected: BigInt = text.parse().unwrap();
        prop_assert_eq!(calculator.execute(&format!("{}={}", a, text)), Outcome::Silent);
        prop_assert_eq!(calculator.execute(&format!("{}={}", b, a)), Outcome::Silent);
        prop_assert_eq!(calculator.execute(&b), Outcome::Value(expected));
    }

    #[test]
    fn matches_native_arithmetic(x in -10_000i64..10_000, y in -10_000i64..10_000) {
        let mut calculator = Calculator::new();
        let sum = calculator.execute(&normalize(&format!("{} + {}", x, y)));
        prop_assert_eq!(sum, Outcome::Value(BigInt::from(x + y)));
        let product = calculator.execute(&normalize(&format!("{} * {}", x, y)));
        prop_assert_eq!(product, Outcome::Value(BigInt::from(x * y)));
        let difference = calculator.execute(&normalize(&format!("{} - {}", x, y)));
        prop_assert_eq!(difference, Outcome::Value(BigInt::from(x - y)));
        if y != 0 {
            // i64 division also truncates toward zero.
            let quotient = calculator.execute(&normalize(&format!("{} / {}", x, y)));
            prop_assert_eq!(quotient, Outcome::Value(BigInt::from(x / y)));
        }
    }

    #[test]
    fn doubled_operators_always_rejected(
        left in "[a-z0-9+()]{0,6}",
        op in prop::sample::select(vec!["**", "//"]),
        right in "[a-z0-9=()]{0,6}",
    ) {
        let mut calculator = Calculator::new();
        let outcome = calculator.execute(&format!("{}{}{}", left, op, right));
        prop_assert_eq!(error_kind(&outcome), Some(ErrorKind::InvalidExpression));
    }

    #[test]
    fn re_evaluation_is_stable(x in 0u32..50, y in 1u32..50) {
        let mut calculator = Calculator::new();
        let line = format!("({}+{})*{}^2-{}/{}", x, y, x, y, y);
        prop_assert_eq!(calculator.execute(&line), calculator.execute(&line));
    }
}
