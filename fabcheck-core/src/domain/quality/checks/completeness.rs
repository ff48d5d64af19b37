// fabcheck-core/src/domain/quality/checks/completeness.rs

use super::{Check, CheckError};
use crate::domain::quality::dataset::{LayerSnapshot, TEST_RESULTS};
use crate::domain::quality::violation::Violation;

pub const PASS_FAIL_VALUES: [&str; 2] = ["PASS", "FAIL"];

/// Null or empty identifiers. Count only, a missing id has nothing to show.
#[derive(Debug, Clone)]
pub struct IdentifierPresenceCheck {
    table: &'static str,
    column: &'static str,
}

impl IdentifierPresenceCheck {
    pub fn new(table: &'static str, column: &'static str) -> Self {
        Self { table, column }
    }
}

impl Check for IdentifierPresenceCheck {
    fn name(&self) -> &'static str {
        self.column
    }

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        let values = snapshot.table(self.table)?.column(self.column)?;
        let missing = values
            .iter()
            .filter(|v| v.as_deref().is_none_or(str::is_empty))
            .count();
        Ok(Violation::counted(missing))
    }
}

/// Nulls plus anything that is not exactly PASS or FAIL. Each row counts
/// once.
#[derive(Debug, Clone, Copy)]
pub struct PassFailValueCheck;

impl Check for PassFailValueCheck {
    fn name(&self) -> &'static str {
        "pass_fail"
    }

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        let values = snapshot.table(TEST_RESULTS)?.column("pass_fail")?;
        let invalid = values
            .iter()
            .filter(|v| match v.as_deref() {
                None => true,
                Some(value) => !PASS_FAIL_VALUES.contains(&value),
            })
            .count();
        Ok(Violation::counted(invalid))
    }
}
