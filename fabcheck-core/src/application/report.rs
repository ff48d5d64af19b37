// fabcheck-core/src/application/report.rs

use serde::Serialize;

use crate::domain::quality::{Layer, Status, Verdict};

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayerOutcome {
    /// Data was found and every applicable rule produced a verdict.
    Evaluated,
    /// The layer had no tables; no rule was executed.
    NoData,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
    pub errors: usize,
    pub total: usize,
}

impl StatusCounts {
    fn add(&mut self, status: Status) {
        match status {
            Status::Pass => self.passed += 1,
            Status::Warning => self.warnings += 1,
            Status::Fail => self.failed += 1,
            Status::Error => self.errors += 1,
        }
        self.total += 1;
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
}

/// Verdicts of one layer, in rule evaluation order. Only the engine appends.
#[derive(Debug, Serialize, Clone)]
pub struct LayerReport {
    layer: Layer,
    outcome: LayerOutcome,
    tables: Vec<TableSummary>,
    verdicts: Vec<Verdict>,
}

impl LayerReport {
    pub(crate) fn evaluated(layer: Layer, tables: Vec<TableSummary>) -> Self {
        Self {
            layer,
            outcome: LayerOutcome::Evaluated,
            tables,
            verdicts: Vec::new(),
        }
    }

    pub(crate) fn no_data(layer: Layer) -> Self {
        Self {
            layer,
            outcome: LayerOutcome::NoData,
            tables: Vec::new(),
            verdicts: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, verdict: Verdict) {
        self.verdicts.push(verdict);
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn outcome(&self) -> LayerOutcome {
        self.outcome
    }

    pub fn has_data(&self) -> bool {
        self.outcome == LayerOutcome::Evaluated
    }

    pub fn tables(&self) -> &[TableSummary] {
        &self.tables
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn with_status(&self, status: Status) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(move |v| v.status == status)
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for verdict in &self.verdicts {
            counts.add(verdict.status);
        }
        counts
    }
}

/// Results of every layer run in this process, in first-run order.
#[derive(Debug, Serialize, Clone, Default)]
pub struct RunReport {
    layers: Vec<LayerReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a finished layer. Running the same layer again replaces its
    /// previous results in place.
    pub(crate) fn record(&mut self, report: LayerReport) -> &LayerReport {
        let idx = match self.layers.iter().position(|l| l.layer == report.layer) {
            Some(idx) => {
                self.layers[idx] = report;
                idx
            }
            None => {
                self.layers.push(report);
                self.layers.len() - 1
            }
        };
        &self.layers[idx]
    }

    pub fn layer(&self, layer: Layer) -> Option<&LayerReport> {
        self.layers.iter().find(|l| l.layer == layer)
    }

    pub fn layers(&self) -> &[LayerReport] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Any FAIL or ERROR verdict, in any layer.
    pub fn has_failures(&self) -> bool {
        self.layers.iter().any(|l| {
            let counts = l.counts();
            counts.failed > 0 || counts.errors > 0
        })
    }
}
