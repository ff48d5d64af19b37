// fabcheck-core/src/domain/quality/verdict.rs

use serde::Serialize;
use std::fmt;

use super::rule::{Category, Rule, Severity};
use super::violation::Violation;

/// Examples carried into a verdict (and therefore into every report).
pub const MAX_REPORTED_EXAMPLES: usize = 5;

#[derive(Debug, Serialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pass,
    Warning,
    Fail,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warning => "WARNING",
            Status::Fail => "FAIL",
            Status::Error => "ERROR",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Status::Pass => "✅",
            Status::Warning => "⚠️",
            Status::Fail => "❌",
            Status::Error => "⚡",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status policy. Order matters: the error sentinel wins over everything,
/// then the threshold, then the severity tier.
pub fn evaluate(violation_count: i64, threshold: u64, severity: &Severity) -> Status {
    if violation_count < 0 {
        return Status::Error;
    }
    // a non-negative i64 always fits in u64
    if violation_count.unsigned_abs() <= threshold {
        return Status::Pass;
    }
    if severity.is_blocking() {
        Status::Fail
    } else {
        Status::Warning
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Verdict {
    pub rule_id: String,
    pub rule_name: String,
    pub category: Category,
    pub severity: Severity,
    pub status: Status,
    pub violation_count: i64,
    pub threshold: u64,
    pub impact: String,
    pub examples: Vec<String>,
}

impl Verdict {
    pub fn new(rule: &Rule, violation: Violation) -> Self {
        let status = evaluate(violation.count, rule.threshold, &rule.severity);
        let mut examples = violation.examples;
        examples.truncate(MAX_REPORTED_EXAMPLES);

        Self {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            category: rule.category.clone(),
            severity: rule.severity.clone(),
            status,
            violation_count: violation.count,
            threshold: rule.threshold,
            impact: rule.impact.clone(),
            examples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quality::target::TargetDescriptor;
    use crate::domain::quality::violation::{ERROR_SENTINEL, ExampleSet};
    use std::collections::BTreeSet;

    const ALL_SEVERITIES: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    #[test]
    fn test_at_or_below_threshold_passes() {
        for severity in ALL_SEVERITIES {
            for threshold in [0u64, 1, 5, 100] {
                for count in 0..=threshold as i64 {
                    assert_eq!(evaluate(count, threshold, &severity), Status::Pass);
                }
            }
        }
    }

    #[test]
    fn test_above_threshold_escalates_by_severity() {
        for threshold in [0u64, 3, 10] {
            let count = threshold as i64 + 1;
            assert_eq!(evaluate(count, threshold, &Severity::Critical), Status::Fail);
            assert_eq!(evaluate(count, threshold, &Severity::High), Status::Fail);
            assert_eq!(evaluate(count, threshold, &Severity::Medium), Status::Warning);
            assert_eq!(evaluate(count, threshold, &Severity::Low), Status::Warning);
            assert_eq!(
                evaluate(count, threshold, &Severity::Other("INFO".into())),
                Status::Warning
            );
        }
    }

    #[test]
    fn test_sentinel_is_always_error() {
        for severity in ALL_SEVERITIES {
            for threshold in [0u64, 1, u64::MAX] {
                assert_eq!(
                    evaluate(ERROR_SENTINEL, threshold, &severity),
                    Status::Error
                );
            }
        }
    }

    #[test]
    fn test_verdict_truncates_examples_to_five() {
        let rule = Rule {
            id: "DQ004".into(),
            name: "Equipment Temperature Range".into(),
            category: Category::Range,
            severity: Severity::Medium,
            threshold: 0,
            impact: "N/A".into(),
            layers: BTreeSet::new(),
            target: TargetDescriptor::Temperature,
        };

        let mut examples = ExampleSet::new();
        for i in 0..12 {
            examples.push(&format!("EQ{:03}", i));
        }
        assert!(examples.is_full());

        let verdict = Verdict::new(&rule, Violation::new(12, examples));
        assert_eq!(verdict.status, Status::Warning);
        assert_eq!(verdict.violation_count, 12);
        assert_eq!(
            verdict.examples,
            vec!["EQ000", "EQ001", "EQ002", "EQ003", "EQ004"]
        );
    }
}
