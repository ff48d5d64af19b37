// fabcheck-core/src/domain/quality/checks/range.rs

use std::collections::BTreeMap;

use super::{Check, CheckError, parse_number};
use crate::domain::quality::dataset::{EQUIPMENT_LOGS, LayerSnapshot, TEST_RESULTS};
use crate::domain::quality::violation::{ExampleSet, Violation};

pub const TEMPERATURE_MIN_C: f64 = -50.0;
pub const TEMPERATURE_MAX_C: f64 = 500.0;
pub const PRESSURE_MIN_TORR: f64 = 0.001;
pub const PRESSURE_MAX_TORR: f64 = 1000.0;

/// Counts rows of `table` whose numeric `value_column` satisfies
/// `is_violation`, collecting the row's `id_column` as examples.
/// Null values never violate.
fn scan_numeric(
    snapshot: &LayerSnapshot,
    table: &str,
    value_column: &str,
    id_column: &str,
    is_violation: impl Fn(f64) -> bool,
) -> Result<Violation, CheckError> {
    let data = snapshot.table(table)?;
    let values = data.column(value_column)?;
    let ids = data.column(id_column)?;

    let mut count = 0usize;
    let mut examples = ExampleSet::new();

    for (value, id) in values.iter().zip(ids) {
        let Some(raw) = value else { continue };
        let number = parse_number(table, value_column, raw)?;
        if number.is_nan() {
            continue;
        }
        if is_violation(number) {
            count += 1;
            if let Some(id) = id {
                examples.push(id);
            }
        }
    }

    Ok(Violation::new(count, examples))
}

/// Per-batch yield: share of PASS rows, in percent, outside [0, 100].
#[derive(Debug, Clone, Copy)]
pub struct YieldPercentCheck;

impl Check for YieldPercentCheck {
    fn name(&self) -> &'static str {
        "batch_yield_pct"
    }

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        let tests = snapshot.table(TEST_RESULTS)?;
        let batches = tests.column("batch_id")?;
        let outcomes = tests.column("pass_fail")?;

        // batch_id -> (passed, total); rows without a batch are not grouped
        let mut per_batch: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for (batch, outcome) in batches.iter().zip(outcomes) {
            let Some(batch) = batch else { continue };
            let entry = per_batch.entry(batch.as_str()).or_default();
            if outcome.as_deref() == Some("PASS") {
                entry.0 += 1;
            }
            entry.1 += 1;
        }

        let mut count = 0usize;
        let mut examples = ExampleSet::new();
        for (batch, (passed, total)) in per_batch {
            let yield_pct = passed as f64 / total as f64 * 100.0;
            if !(0.0..=100.0).contains(&yield_pct) {
                count += 1;
                examples.push(batch);
            }
        }

        Ok(Violation::new(count, examples))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DefectDensityCheck;

impl Check for DefectDensityCheck {
    fn name(&self) -> &'static str {
        "defect_density"
    }

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        scan_numeric(snapshot, TEST_RESULTS, "defect_density", "wafer_id", |v| {
            v < 0.0
        })
    }
}

/// Chamber temperature; both bounds are themselves valid readings.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureCheck;

impl Check for TemperatureCheck {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        scan_numeric(
            snapshot,
            EQUIPMENT_LOGS,
            "temperature_c",
            "equipment_id",
            |v| !(TEMPERATURE_MIN_C..=TEMPERATURE_MAX_C).contains(&v),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PressureCheck;

impl Check for PressureCheck {
    fn name(&self) -> &'static str {
        "pressure"
    }

    fn evaluate(&self, snapshot: &LayerSnapshot) -> Result<Violation, CheckError> {
        scan_numeric(
            snapshot,
            EQUIPMENT_LOGS,
            "pressure_torr",
            "equipment_id",
            |v| !(PRESSURE_MIN_TORR..=PRESSURE_MAX_TORR).contains(&v),
        )
    }
}
