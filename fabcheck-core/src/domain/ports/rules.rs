// fabcheck-core/src/domain/ports/rules.rs

use crate::domain::quality::RuleCatalog;
use crate::error::FabcheckError;

pub trait RuleSource {
    /// Returns a fully validated catalog or the first configuration error.
    fn load(&self) -> Result<RuleCatalog, FabcheckError>;
}
