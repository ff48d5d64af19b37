// fabcheck-core/src/domain/quality/checks/uniqueness.rs

use std::collections::BTreeMap;

use super::{Check, CheckError};
use crate::domain::quality::dataset::{LayerSnapshot, TEST_RESULTS};
use crate::domain::quality::violation::{ExampleSet, Violation};

/// One violation per `(batch_id, wafer_id)` group holding more than one row.
/// Groups are visited in key order, rows with a null key are ignored.
#[derive(Debug, Clone, Copy)]
pub struct BatchWaferPairCheck;

impl Check for BatchWaferPairCheck {
    fn name(&self) -> &'static str {
        "batch_wafer_pair"
    }

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        let tests = snapshot.table(TEST_RESULTS)?;
        let batches = tests.column("batch_id")?;
        let wafers = tests.column("wafer_id")?;

        let mut groups: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        for (batch, wafer) in batches.iter().zip(wafers) {
            if let (Some(batch), Some(wafer)) = (batch, wafer) {
                *groups.entry((batch.as_str(), wafer.as_str())).or_default() += 1;
            }
        }

        let mut count = 0usize;
        let mut examples = ExampleSet::new();
        for ((_, wafer), rows) in groups {
            if rows > 1 {
                count += 1;
                examples.push(wafer);
            }
        }

        Ok(Violation::new(count, examples))
    }
}
