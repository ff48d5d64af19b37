// fabcheck-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid rule '{rule}': {reason}")]
    #[diagnostic(
        code(fabcheck::domain::invalid_rule),
        help("Every rule needs an id, a name, a known category and a known severity.")
    )]
    InvalidRule { rule: String, reason: String },

    #[error("Duplicate rule id '{0}' in catalog")]
    #[diagnostic(
        code(fabcheck::domain::duplicate_rule),
        help("Rule ids must be unique across the whole catalog.")
    )]
    DuplicateRule(String),

    #[error("Unknown layer '{0}'")]
    #[diagnostic(
        code(fabcheck::domain::unknown_layer),
        help("Valid layers are: raw, staging, curated.")
    )]
    UnknownLayer(String),
}

impl DomainError {
    pub fn invalid_rule(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::InvalidRule {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}
