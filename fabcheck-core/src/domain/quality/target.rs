// fabcheck-core/src/domain/quality/target.rs

use serde::Serialize;
use std::fmt;

use super::rule::Category;

/// What a rule inspects. The set is closed: anything the catalog names that
/// is not listed here resolves to `Unrecognized` and evaluates as a no-op.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TargetDescriptor {
    // REFERENTIAL_INTEGRITY
    TestResultBatchLink,
    // RANGE
    BatchYieldPct,
    DefectDensity,
    Temperature,
    Pressure,
    // COMPLETENESS
    WaferIdPresent,
    EquipmentIdPresent,
    PassFailValid,
    // UNIQUENESS
    BatchWaferPair,
    // TEMPORAL
    ProcessStepOrder,

    Unrecognized(String),
}

impl TargetDescriptor {
    /// Resolves an explicit `target:` key. Keys are only valid for their own
    /// category (`wafer_id` is a completeness target, not a uniqueness one).
    pub fn parse(category: &Category, key: &str) -> Self {
        let normalized = key.trim().to_ascii_lowercase();
        match (category, normalized.as_str()) {
            (Category::ReferentialIntegrity, "test_result_batch_link" | "wafer_batch_link") => {
                Self::TestResultBatchLink
            }
            (Category::Range, "batch_yield_pct" | "yield_pct") => Self::BatchYieldPct,
            (Category::Range, "defect_density") => Self::DefectDensity,
            (Category::Range, "temperature" | "temperature_c") => Self::Temperature,
            (Category::Range, "pressure" | "pressure_torr") => Self::Pressure,
            (Category::Completeness, "wafer_id") => Self::WaferIdPresent,
            (Category::Completeness, "equipment_id") => Self::EquipmentIdPresent,
            (Category::Completeness, "pass_fail") => Self::PassFailValid,
            (Category::Uniqueness, "batch_wafer_pair" | "batch_id,wafer_id") => {
                Self::BatchWaferPair
            }
            (Category::Temporal, "process_step_order") => Self::ProcessStepOrder,
            _ => Self::Unrecognized(key.trim().to_string()),
        }
    }

    /// Derives a target from a legacy `check_sql` text. Runs once, when the
    /// catalog is loaded; the keyword order per category matters.
    ///
    /// Legacy catalogs describe the linkage rule against a `wafer_tests`
    /// table. The resulting check still reads `test_results`.
    pub fn infer_from_sql(category: &Category, rule_name: &str, sql: &str) -> Self {
        let resolved = match category {
            Category::ReferentialIntegrity => {
                (sql.contains("wafer_tests") && sql.contains("wafer_batches"))
                    .then_some(Self::TestResultBatchLink)
            }
            Category::Range => {
                if sql.contains("yield_pct") {
                    Some(Self::BatchYieldPct)
                } else if sql.contains("defect_density") {
                    Some(Self::DefectDensity)
                } else if sql.contains("temperature") {
                    Some(Self::Temperature)
                } else if sql.contains("pressure") {
                    Some(Self::Pressure)
                } else {
                    None
                }
            }
            Category::Completeness => {
                if sql.contains("wafer_id") {
                    Some(Self::WaferIdPresent)
                } else if sql.contains("equipment_id") {
                    Some(Self::EquipmentIdPresent)
                } else if sql.contains("pass_fail") {
                    Some(Self::PassFailValid)
                } else {
                    None
                }
            }
            Category::Uniqueness => (sql.contains("wafer_id") && sql.contains("batch_id"))
                .then_some(Self::BatchWaferPair),
            Category::Temporal => rule_name
                .contains("Process Step Sequence")
                .then_some(Self::ProcessStepOrder),
            Category::Other(_) => None,
        };

        resolved.unwrap_or_else(|| Self::Unrecognized(sql.trim().to_string()))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    pub fn key(&self) -> &str {
        match self {
            Self::TestResultBatchLink => "test_result_batch_link",
            Self::BatchYieldPct => "batch_yield_pct",
            Self::DefectDensity => "defect_density",
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::WaferIdPresent => "wafer_id",
            Self::EquipmentIdPresent => "equipment_id",
            Self::PassFailValid => "pass_fail",
            Self::BatchWaferPair => "batch_wafer_pair",
            Self::ProcessStepOrder => "process_step_order",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(raw) if raw.is_empty() => f.write_str("<none>"),
            Self::Unrecognized(raw) => write!(f, "<unrecognized: {}>", raw),
            other => f.write_str(other.key()),
        }
    }
}
