// fabcheck-core/src/domain/quality/checks/temporal.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

use super::{Check, CheckError, parse_number};
use crate::domain::quality::dataset::{LayerSnapshot, TEST_RESULTS};
use crate::domain::quality::violation::{ExampleSet, Violation};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

struct StepRow<'a> {
    batch: &'a str,
    step: Option<f64>,
    start: Option<NaiveDateTime>,
}

/// Null step ids sort after every numbered step of their batch.
fn step_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Within a batch, ordered by step id, a step must not start before the
/// step right before it. The first step of a batch has nothing to compare
/// against; a null start time on either side is skipped.
#[derive(Debug, Clone, Copy)]
pub struct ProcessStepOrderCheck;

impl Check for ProcessStepOrderCheck {
    fn name(&self) -> &'static str {
        "process_step_order"
    }

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        let tests = snapshot.table(TEST_RESULTS)?;
        let batches = tests.column("batch_id")?;
        let steps = tests.column("process_step_id")?;
        let starts = tests.column("start_time")?;

        let mut rows = Vec::with_capacity(tests.row_count());
        for ((batch, step), start) in batches.iter().zip(steps).zip(starts) {
            let Some(batch) = batch else { continue };

            let step = match step {
                Some(raw) => Some(parse_number(TEST_RESULTS, "process_step_id", raw)?),
                None => None,
            };
            let start = match start {
                Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| {
                    CheckError::MalformedValue {
                        table: TEST_RESULTS.to_string(),
                        column: "start_time".to_string(),
                        value: raw.clone(),
                        expected: "a timestamp",
                    }
                })?),
                None => None,
            };

            rows.push(StepRow {
                batch: batch.as_str(),
                step,
                start,
            });
        }

        // stable: rows sharing (batch, step) keep their file order
        rows.sort_by(|a, b| {
            a.batch
                .cmp(b.batch)
                .then_with(|| step_order(a.step, b.step))
        });

        let mut count = 0usize;
        let mut examples = ExampleSet::new();
        for pair in rows.windows(2) {
            let [prev, current] = pair else { continue };
            if prev.batch != current.batch {
                continue;
            }
            if let (Some(prev_start), Some(start)) = (prev.start, current.start)
                && start < prev_start
            {
                count += 1;
                examples.push(current.batch);
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

    const COLUMNS: [&str; 3] = ["batch_id", "process_step_id", "start_time"];

    #[test]
    fn test_step_starting_before_previous_step() {
        let snap = snapshot(vec![table(
            "test_results",
            &COLUMNS,
            &[
                &["B1", "1", "2024-01-01 08:00:00"],
                &["B1", "2", "2024-01-01 07:59:00"],
            ],
        )]);
        let violation = ProcessStepOrderCheck.evaluate(&snap).unwrap();
        assert_eq!(violation.count, 1);
        assert_eq!(violation.examples, vec!["B1"]);
    }

    #[test]
    fn test_rows_are_sorted_before_comparison() {
        // file order is shuffled; sorted by step the sequence is fine
        let snap = snapshot(vec![table(
            "test_results",
            &COLUMNS,
            &[
                &["B1", "3", "2024-01-01 10:00:00"],
                &["B1", "1", "2024-01-01 08:00:00"],
                &["B1", "2", "2024-01-01 09:00:00"],
            ],
        )]);
        assert_eq!(ProcessStepOrderCheck.evaluate(&snap).unwrap().count, 0);
    }

    #[test]
    fn test_numeric_step_order_not_lexicographic() {
        let snap = snapshot(vec![table(
            "test_results",
            &COLUMNS,
            &[
                &["B1", "10", "2024-01-01 12:00:00"],
                &["B1", "9", "2024-01-01 11:00:00"],
            ],
        )]);
        assert_eq!(ProcessStepOrderCheck.evaluate(&snap).unwrap().count, 0);
    }

    #[test]
    fn test_batches_are_independent() {
        let snap = snapshot(vec![table(
            "test_results",
            &COLUMNS,
            &[
                &["B1", "1", "2024-01-02 08:00:00"],
                &["B2", "1", "2024-01-01 08:00:00"],
                &["B2", "2", "2024-01-01 07:00:00"],
                &["B2", "3", "2024-01-01 06:00:00"],
            ],
        )]);
        let violation = ProcessStepOrderCheck.evaluate(&snap).unwrap();
        assert_eq!(violation.count, 2);
        assert_eq!(violation.examples, vec!["B2"]);
    }

    #[test]
    fn test_null_start_time_is_skipped() {
        let snap = snapshot(vec![table(
            "test_results",
            &COLUMNS,
            &[
                &["B1", "1", "2024-01-01 08:00:00"],
                &["B1", "2", "NULL"],
                &["B1", "3", "2024-01-01 07:00:00"],
            ],
        )]);
        assert_eq!(ProcessStepOrderCheck.evaluate(&snap).unwrap().count, 0);
    }

    #[test]
    fn test_unparseable_timestamp_is_an_error() {
        let snap = snapshot(vec![table(
            "test_results",
            &COLUMNS,
            &[&["B1", "1", "yesterday"]],
        )]);
        let err = ProcessStepOrderCheck.evaluate(&snap).unwrap_err();
        assert!(matches!(err, CheckError::MalformedValue { ref column, .. } if column == "start_time"));
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2024-01-01 08:00:00").is_some());
        assert!(parse_timestamp("2024-01-01 08:00:00.250").is_some());
        assert!(parse_timestamp("2024-01-01T08:00:00").is_some());
        assert!(parse_timestamp("2024-01-01T08:00:00Z").is_some());
        assert!(parse_timestamp("2024-01-01").is_some());
        assert!(parse_timestamp("not a date").is_none());
    }
}
