// fabcheck-core/src/domain/ports/mod.rs

pub mod datasets;
pub mod rules;

pub use datasets::DatasetSource;
pub use rules::RuleSource;
