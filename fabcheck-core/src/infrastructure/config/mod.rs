// fabcheck-core/src/infrastructure/config/mod.rs

pub mod project;
pub mod rules;

pub use project::{FabcheckConfig, load_project_config};
pub use rules::YamlRuleCatalog;
