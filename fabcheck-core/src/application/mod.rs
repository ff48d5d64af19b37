// fabcheck-core/src/application/mod.rs

pub mod engine;
pub mod ports;
pub mod report;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI peut faire `use fabcheck_core::application::{QualityEngine, RunReport};`
// sans connaître la structure interne des fichiers.

pub use engine::{PlannedRule, QualityEngine};
pub use report::{LayerOutcome, LayerReport, RunReport, StatusCounts, TableSummary};
