// fabcheck/src/commands/rules.rs
//
// USE CASE: Validate the catalog and show what each rule will check.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use fabcheck_core::domain::ports::RuleSource;
use fabcheck_core::domain::quality::Layer;
use fabcheck_core::infrastructure::config::{YamlRuleCatalog, load_project_config};

pub fn execute(
    project_dir: PathBuf,
    rules: Option<PathBuf>,
    layer: Option<Layer>,
) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir).with_context(|| {
        format!("Failed to load project configuration from {:?}", project_dir)
    })?;
    let rules_path = rules.unwrap_or(config.rules_path);

    let catalog = YamlRuleCatalog::new(&rules_path).load()?;
    println!(
        "📋 {} rules in {}",
        catalog.len(),
        rules_path.display()
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID", "Name", "Category", "Severity", "Threshold", "Layers", "Target",
    ]);

    let selected = catalog
        .rules()
        .iter()
        .filter(|r| layer.is_none_or(|l| r.applies_to(l)));

    for rule in selected {
        let layers = rule
            .layers
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            rule.id.clone(),
            rule.name.clone(),
            rule.category.to_string(),
            rule.severity.to_string(),
            rule.threshold.to_string(),
            layers,
            rule.target.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
