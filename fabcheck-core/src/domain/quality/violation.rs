// fabcheck-core/src/domain/quality/violation.rs

use serde::Serialize;

use super::checks::CheckError;

/// Examples kept while a check runs. Display truncates further.
pub const MAX_COLLECTED_EXAMPLES: usize = 10;

/// Reserved count meaning "the check itself failed".
pub const ERROR_SENTINEL: i64 = -1;

/// Distinct example identifiers in discovery order, capped at
/// `MAX_COLLECTED_EXAMPLES`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleSet {
    values: Vec<String>,
}

impl ExampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the value was a duplicate or the set is full.
    pub fn push(&mut self, value: &str) -> bool {
        if self.is_full() || self.values.iter().any(|v| v == value) {
            return false;
        }
        self.values.push(value.to_string());
        true
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= MAX_COLLECTED_EXAMPLES
    }

    pub fn into_vec(self) -> Vec<String> {
        self.values
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub count: i64,
    pub examples: Vec<String>,
}

impl Violation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn counted(count: usize) -> Self {
        Self::new(count, ExampleSet::new())
    }

    pub fn new(count: usize, examples: ExampleSet) -> Self {
        Self {
            count: i64::try_from(count).unwrap_or(i64::MAX),
            examples: examples.into_vec(),
        }
    }

    pub fn from_error(err: &CheckError) -> Self {
        Self {
            count: ERROR_SENTINEL,
            examples: vec![format!("Error: {}", err)],
        }
    }

    pub fn is_error(&self) -> bool {
        self.count < 0
    }
}
