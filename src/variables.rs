use crate::error::{CalcError, Span};
use num_bigint::BigInt;
use std::collections::HashMap;

/// Variable bindings for one calculator session.
///
/// Entries are created or overwritten by assignment and never removed.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: HashMap<String, BigInt>,
}

impl Variables {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&BigInt> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn assign(&mut self, name: &str, value: BigInt) {
        self.values.insert(name.to_string(), value);
    }

    /// Bind `name` to the current value of `source`.
    ///
    /// `name` is left untouched when `source` is unbound.
    pub fn reference(&mut self, name: &str, source: &str, span: Span) -> Result<(), CalcError> {
        let value = self
            .values
            .get(source)
            .cloned()
            .ok_or_else(|| CalcError::unknown_variable(span, source))?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }
}
