// fabcheck-core/src/domain/quality/checks/referential.rs

use std::collections::HashSet;

use super::{Check, CheckError};
use crate::domain::quality::dataset::{LayerSnapshot, TEST_RESULTS, WAFER_BATCHES};
use crate::domain::quality::violation::{ExampleSet, Violation};

/// Left-outer mismatch of `test_results.batch_id` against
/// `wafer_batches.batch_id`. Every orphaned row counts; a null batch id
/// never matches.
#[derive(Debug, Clone, Copy)]
pub struct TestResultBatchLinkCheck;

impl Check for TestResultBatchLinkCheck {
    fn name(&self) -> &'static str {
        "test_result_batch_link"
    }

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        let tests = snapshot.table(TEST_RESULTS)?;
        let batches = snapshot.table(WAFER_BATCHES)?;

        let known: HashSet<&str> = batches
            .column("batch_id")?
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();

        let mut count = 0usize;
        let mut examples = ExampleSet::new();
        for batch in tests.column("batch_id")? {
            match batch {
                Some(id) if known.contains(id.as_str()) => {}
                Some(id) => {
                    count += 1;
                    examples.push(id);
                }
                None => count += 1,
            }
        }

        Ok(Violation::new(count, examples))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::checks::fixtures::{snapshot, table};

    fn batches() -> crate::domain::quality::dataset::Table {
        table("wafer_batches", &["batch_id", "lot_number"], &[&["B1", "L1"], &["B2", "L1"]])
    }

    #[test]
    fn test_orphaned_rows_counted_examples_distinct() {
        let tests = table(
            "test_results",
            &["wafer_id", "batch_id"],
            &[
                &["B1_W01", "B1"],
                &["B9_W01", "B9"],
                &["B9_W02", "B9"],
                &["B7_W01", "B7"],
                &["B2_W01", "B2"],
            ],
        );
        let violation = TestResultBatchLinkCheck
            .evaluate(&snapshot(vec![tests, batches()]))
            .unwrap();
        assert_eq!(violation.count, 3);
        assert_eq!(violation.examples, vec!["B9", "B7"]);
    }

    #[test]
    fn test_null_batch_is_orphan_without_example() {
        let tests = table("test_results", &["batch_id"], &[&["NULL"], &["B1"]]);
        let violation = TestResultBatchLinkCheck
            .evaluate(&snapshot(vec![tests, batches()]))
            .unwrap();
        assert_eq!(violation.count, 1);
        assert!(violation.examples.is_empty());
    }

    #[test]
    fn test_requires_both_tables() {
        let tests = table("test_results", &["batch_id"], &[&["B1"]]);
        let err = TestResultBatchLinkCheck
            .evaluate(&snapshot(vec![tests]))
            .unwrap_err();
        assert_eq!(err, CheckError::MissingTable("wafer_batches".into()));
    }
}
