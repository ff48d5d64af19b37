// fabcheck-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum FabcheckError {
    // --- ERREURS DU DOMAINE (Catalogue de règles) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, DuckDB) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl FabcheckError {
    /// True for the fatal, pre-execution configuration failures.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FabcheckError::Domain(_)
                | FabcheckError::Infrastructure(
                    InfrastructureError::YamlError(_) | InfrastructureError::RulesNotFound(_)
                )
        )
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for FabcheckError {
    fn from(err: std::io::Error) -> Self {
        FabcheckError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<serde_yaml::Error> for FabcheckError {
    fn from(err: serde_yaml::Error) -> Self {
        FabcheckError::Infrastructure(InfrastructureError::YamlError(err))
    }
}
