// fabcheck-core/src/domain/quality/checks/mod.rs

// One module per rule category. `resolve` is the only place that knows which
// struct serves which target.

pub mod completeness;
pub mod range;
pub mod referential;
pub mod temporal;
pub mod uniqueness;

use thiserror::Error;

use super::dataset::{EQUIPMENT_LOGS, LayerSnapshot, TEST_RESULTS};
use super::target::TargetDescriptor;
use super::violation::Violation;

pub use completeness::{IdentifierPresenceCheck, PassFailValueCheck};
pub use range::{DefectDensityCheck, PressureCheck, TemperatureCheck, YieldPercentCheck};
pub use referential::TestResultBatchLinkCheck;
pub use temporal::ProcessStepOrderCheck;
pub use uniqueness::BatchWaferPairCheck;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckError {
    #[error("table '{0}' is not loaded for this layer")]
    MissingTable(String),

    #[error("column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    #[error("malformed value '{value}' in {table}.{column}: expected {expected}")]
    MalformedValue {
        table: String,
        column: String,
        value: String,
        expected: &'static str,
    },
}

/// A single data-quality algorithm. Implementations only read the snapshot.
pub trait Check {
    fn name(&self) -> &'static str;

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError>;
}

/// Target the catalog described but no algorithm implements.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCheck;

impl Check for NoOpCheck {
    fn name(&self) -> &'static str {
        "no_op"
    }

    fn evaluate(&self, _snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        Ok(Violation::none())
    }
}

/// Maps a resolved target to its check. Total over `TargetDescriptor`.
pub fn resolve(target: &TargetDescriptor) -> Box<dyn Check> {
    match target {
        TargetDescriptor::TestResultBatchLink => Box::new(TestResultBatchLinkCheck),
        TargetDescriptor::BatchYieldPct => Box::new(YieldPercentCheck),
        TargetDescriptor::DefectDensity => Box::new(DefectDensityCheck),
        TargetDescriptor::Temperature => Box::new(TemperatureCheck),
        TargetDescriptor::Pressure => Box::new(PressureCheck),
        TargetDescriptor::WaferIdPresent => {
            Box::new(IdentifierPresenceCheck::new(TEST_RESULTS, "wafer_id"))
        }
        TargetDescriptor::EquipmentIdPresent => {
            Box::new(IdentifierPresenceCheck::new(EQUIPMENT_LOGS, "equipment_id"))
        }
        TargetDescriptor::PassFailValid => Box::new(PassFailValueCheck),
        TargetDescriptor::BatchWaferPair => Box::new(BatchWaferPairCheck),
        TargetDescriptor::ProcessStepOrder => Box::new(ProcessStepOrderCheck),
        TargetDescriptor::Unrecognized(_) => Box::new(NoOpCheck),
    }
}

pub(crate) fn parse_number(table: &str, column: &str, raw: &str) -> Result<f64, CheckError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CheckError::MalformedValue {
            table: table.to_string(),
            column: column.to_string(),
            value: raw.to_string(),
            expected: "a number",
        })
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::fixtures::{snapshot, table};
    use super::*;

    #[test]
    fn test_unrecognized_target_is_noop() {
        let check = resolve(&TargetDescriptor::Unrecognized("SELECT 42".into()));
        assert_eq!(check.name(), "no_op");
        // even without any table loaded
        let violation = check.evaluate(&snapshot(vec![])).unwrap();
        assert_eq!(violation, Violation::none());
    }

    #[test]
    fn test_every_recognized_target_has_a_real_check() {
        let targets = [
            TargetDescriptor::TestResultBatchLink,
            TargetDescriptor::BatchYieldPct,
            TargetDescriptor::DefectDensity,
            TargetDescriptor::Temperature,
            TargetDescriptor::Pressure,
            TargetDescriptor::WaferIdPresent,
            TargetDescriptor::EquipmentIdPresent,
            TargetDescriptor::PassFailValid,
            TargetDescriptor::BatchWaferPair,
            TargetDescriptor::ProcessStepOrder,
        ];
        for target in targets {
            assert_ne!(resolve(&target).name(), "no_op", "{:?}", target);
        }
    }

    #[test]
    fn test_missing_table_is_an_error_not_a_noop() {
        let check = resolve(&TargetDescriptor::Temperature);
        let err = check.evaluate(&snapshot(vec![])).unwrap_err();
        assert_eq!(err, CheckError::MissingTable("equipment_logs".into()));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let logs = table("equipment_logs", &["equipment_id"], &[&["ETC001"]]);
        let err = resolve(&TargetDescriptor::Pressure)
            .evaluate(&snapshot(vec![logs]))
            .unwrap_err();
        assert!(matches!(err, CheckError::MissingColumn { column, .. } if column == "pressure_torr"));
    }
}
