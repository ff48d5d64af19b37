// fabcheck/src/commands/check.rs
//
// USE CASE: Run the rule catalog against the requested layers.

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;
use fabcheck_core::application::QualityEngine;
use fabcheck_core::application::ports::{RenderContext, ReportRenderer};
use fabcheck_core::domain::ports::RuleSource;
use fabcheck_core::domain::quality::Layer;
use fabcheck_core::infrastructure::adapters::DuckDbDatasetRegistry;
use fabcheck_core::infrastructure::config::{YamlRuleCatalog, load_project_config};
use fabcheck_core::infrastructure::fs::write_report;
use fabcheck_core::infrastructure::render::{MarkdownRenderer, write_json_results};

use crate::output;

pub struct CheckArgs {
    pub layers: Vec<Layer>,
    pub project_dir: PathBuf,
    pub rules: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub report: bool,
    pub report_path: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub strict: bool,
}

/// Outcome the caller turns into an exit code.
#[derive(Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Clean,
    /// `--strict` and at least one FAIL or ERROR verdict.
    StrictFailure,
}

pub fn execute(args: CheckArgs) -> anyhow::Result<CheckOutcome> {
    // A. Config (file < env < CLI flags)
    let mut config = load_project_config(&args.project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            args.project_dir
        )
    })?;
    if let Some(rules) = args.rules {
        config.rules_path = rules;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    let write_markdown = args.report || args.report_path.is_some();
    if let Some(report_path) = args.report_path {
        config.report_path = report_path;
    }
    let strict = args.strict || config.strict;
    info!(?config, strict, "Effective configuration");

    // B. Catalog: any invalid rule aborts before a single check runs
    println!("⚙️  Loading rules from {}...", config.rules_path.display());
    let catalog = YamlRuleCatalog::new(&config.rules_path).load()?;
    println!("   {} rules loaded", catalog.len());

    // C. Engine
    let datasets = DuckDbDatasetRegistry::new(&config.data_dir);
    let mut engine = QualityEngine::new(catalog, datasets);

    for layer in args.layers {
        let layer_report = engine
            .run(layer)
            .with_context(|| format!("Failed to load the {} layer", layer))?;
        output::print_layer(layer_report);
    }

    // D. Outputs
    let report = engine.into_report();
    let context = RenderContext::now(config.data_dir.display().to_string());

    if write_markdown {
        let markdown = MarkdownRenderer::new()?.render(&report, &context)?;
        write_report(&config.report_path, markdown).with_context(|| {
            format!("Failed to write report to {:?}", config.report_path)
        })?;
        println!("✅ DQ Report generated: {}\n", config.report_path.display());
    }

    if let Some(json_path) = args.json {
        write_json_results(&json_path, &report, &context)?;
        println!("📄 JSON results saved to {}", json_path.display());
    }

    if strict && report.has_failures() {
        return Ok(CheckOutcome::StrictFailure);
    }
    Ok(CheckOutcome::Clean)
}
