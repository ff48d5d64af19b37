// fabcheck-core/src/infrastructure/config/project.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["fabcheck.yaml", "fabcheck.yml"];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FabcheckConfig {
    /// YAML rules catalog.
    pub rules_path: PathBuf,
    /// Root holding one sub-directory per layer.
    pub data_dir: PathBuf,
    /// Markdown report destination.
    pub report_path: PathBuf,
    /// Exit non-zero when any rule fails or errors.
    pub strict: bool,
}

impl Default for FabcheckConfig {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from("dq/rules.yml"),
            data_dir: PathBuf::from("data"),
            report_path: PathBuf::from("dq/dq_report.md"),
            strict: false,
        }
    }
}

impl FabcheckConfig {
    /// Anchors every relative path on `project_dir`.
    pub fn rooted_at(mut self, project_dir: &Path) -> Self {
        for path in [
            &mut self.rules_path,
            &mut self.data_dir,
            &mut self.report_path,
        ] {
            if path.is_relative() {
                *path = project_dir.join(&*path);
            }
        }
        self
    }
}

// --- LOADER ---

/// Reads `fabcheck.yaml` when present (defaults otherwise), applies the
/// `FABCHECK_*` environment overrides, then roots paths on `project_dir`.
#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<FabcheckConfig, InfrastructureError> {
    let mut config = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading project configuration");
            let content = fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&content)?
        }
        None => {
            info!("No fabcheck.yaml found, using defaults");
            FabcheckConfig::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config.rooted_at(project_dir))
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

// Permet de faire: FABCHECK_DATA_DIR=/mnt/fab fabcheck check
fn apply_env_overrides(config: &mut FabcheckConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("FABCHECK_RULES") {
        info!(old = ?config.rules_path, new = ?val, "Overriding rules path via ENV");
        config.rules_path = PathBuf::from(val);
    }
    if let Some(val) = lookup("FABCHECK_DATA_DIR") {
        info!(old = ?config.data_dir, new = ?val, "Overriding data dir via ENV");
        config.data_dir = PathBuf::from(val);
    }
    if let Some(val) = lookup("FABCHECK_REPORT_PATH") {
        info!(old = ?config.report_path, new = ?val, "Overriding report path via ENV");
        config.report_path = PathBuf::from(val);
    }
    if let Some(val) = lookup("FABCHECK_STRICT") {
        config.strict = matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
    }
}
