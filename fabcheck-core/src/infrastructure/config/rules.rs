// fabcheck-core/src/infrastructure/config/rules.rs

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::ports::RuleSource;
use crate::domain::quality::{RuleCatalog, RuleRecord};
use crate::error::FabcheckError;
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rules: Vec<RuleRecord>,
}

/// Rules catalog stored as `rules: [...]` in a YAML file.
#[derive(Debug, Clone)]
pub struct YamlRuleCatalog {
    path: PathBuf,
}

impl YamlRuleCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a catalog from YAML text.
    pub fn parse(content: &str) -> Result<RuleCatalog, FabcheckError> {
        let file: RulesFile = serde_yaml::from_str(content).map_err(InfrastructureError::YamlError)?;
        Ok(RuleCatalog::from_records(file.rules)?)
    }
}

impl RuleSource for YamlRuleCatalog {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<RuleCatalog, FabcheckError> {
        if !self.path.exists() {
            return Err(InfrastructureError::RulesNotFound(self.path.display().to_string()).into());
        }

        let content = fs::read_to_string(&self.path).map_err(InfrastructureError::Io)?;
        let catalog = Self::parse(&content)?;
        info!(rules = catalog.len(), "Rules catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::domain::quality::{Layer, TargetDescriptor};
    use anyhow::Result;
    use tempfile::tempdir;

    const CATALOG: &str = r#"
rules:
  - rule_id: DQ001
    name: Test Result Batch Linkage
    category: REFERENTIAL_INTEGRITY
    severity: CRITICAL
    layers: [raw, staging]
    impact: Orphaned test results break yield roll-ups
    check_sql: |
      SELECT t.* FROM wafer_tests t
      LEFT JOIN wafer_batches b ON t.batch_id = b.batch_id
      WHERE b.batch_id IS NULL
  - rule_id: DQ002
    name: Equipment Temperature Range
    category: RANGE
    severity: MEDIUM
    threshold: 5
    layer: raw
    target: temperature
"#;

    #[test]
    fn test_load_from_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rules.yml");
        fs::write(&path, CATALOG)?;

        let catalog = YamlRuleCatalog::new(&path).load()?;
        assert_eq!(catalog.len(), 2);

        let first = &catalog.rules()[0];
        assert_eq!(first.target, TargetDescriptor::TestResultBatchLink);
        assert!(first.applies_to(Layer::Staging));
        assert_eq!(catalog.rules()[1].threshold, 5);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = YamlRuleCatalog::new("/definitely/not/here.yml")
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            FabcheckError::Infrastructure(InfrastructureError::RulesNotFound(_))
        ));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_missing_severity_aborts_whole_catalog() {
        let yaml = r#"
rules:
  - rule_id: DQ001
    name: Fine
    category: RANGE
    severity: LOW
  - rule_id: DQ002
    name: Broken
    category: RANGE
"#;
        let err = YamlRuleCatalog::parse(yaml).unwrap_err();
        assert!(err.is_config_error());
        assert!(matches!(
            err,
            FabcheckError::Domain(DomainError::InvalidRule { ref rule, .. }) if rule == "DQ002"
        ));
    }

    #[test]
    fn test_empty_catalog_is_valid() -> Result<()> {
        assert!(YamlRuleCatalog::parse("rules: []\n")?.is_empty());
        Ok(())
    }
}
