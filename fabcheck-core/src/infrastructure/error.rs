// fabcheck-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(fabcheck::infra::database::duckdb),
        help("DuckDB could not read a dataset file. Check the file format and encoding.")
    )]
    DuckDB(#[from] duckdb::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Dataset reader) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(fabcheck::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(fabcheck::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Rules catalog not found at '{0}'")]
    #[diagnostic(
        code(fabcheck::infra::rules_missing),
        help("Pass --rules <path> or set FABCHECK_RULES.")
    )]
    RulesNotFound(String),

    // --- OUTPUT ---
    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(fabcheck::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(fabcheck::infra::template),
        help("The built-in report template failed to render.")
    )]
    TemplateError(#[from] minijinja::Error),
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
