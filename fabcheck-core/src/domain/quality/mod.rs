// fabcheck-core/src/domain/quality/mod.rs

pub mod checks;
pub mod dataset;
pub mod rule;
pub mod target;
pub mod verdict;
pub mod violation;

pub use checks::{Check, CheckError, NoOpCheck, resolve};
pub use dataset::{LayerSnapshot, Table};
pub use rule::{Category, Layer, LayerSpec, Rule, RuleCatalog, RuleRecord, Severity};
pub use target::TargetDescriptor;
pub use verdict::{Status, Verdict, evaluate};
pub use violation::{ExampleSet, Violation};
