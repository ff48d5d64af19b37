// fabcheck/src/output.rs
//
// Console rendering of a layer run (progress lines, summary table, details).

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use fabcheck_core::application::LayerReport;
use fabcheck_core::domain::quality::{Status, Verdict};

const RULE_WIDTH: usize = 70;
const CONSOLE_EXAMPLES: usize = 3;

pub fn progress_line(verdict: &Verdict) -> String {
    let outcome = match verdict.status {
        Status::Pass => "✅ PASS".to_string(),
        Status::Warning => format!("⚠️  WARNING ({} violations)", verdict.violation_count),
        Status::Fail => format!("❌ FAIL ({} violations)", verdict.violation_count),
        Status::Error => "⚡ ERROR".to_string(),
    };
    format!("  [{}] {}... {}", verdict.rule_id, verdict.rule_name, outcome)
}

pub fn summary_table(layer: &LayerReport) -> Table {
    let counts = layer.counts();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Status", "Count"]);

    for (label, count) in [
        ("✅ Passed", counts.passed),
        ("⚠️  Warnings", counts.warnings),
        ("❌ Failed", counts.failed),
        ("⚡ Errors", counts.errors),
        ("Total", counts.total),
    ] {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    table
}

pub fn print_layer(layer: &LayerReport) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule);
    println!("Running Data Quality Checks - Layer: {}", layer.layer());
    println!("{}\n", rule);

    if !layer.has_data() {
        println!("❌ No data found in {} layer", layer.layer());
        return;
    }

    println!("✓ Loaded {} tables", layer.tables().len());
    for t in layer.tables() {
        println!("  Loaded {}: {} rows", t.name, t.rows);
    }

    println!("\nExecuting validation rules...\n");
    for verdict in layer.verdicts() {
        println!("{}", progress_line(verdict));
    }

    print_summary(layer);
}

fn print_summary(layer: &LayerReport) {
    let rule = "=".repeat(RULE_WIDTH);
    let thin = "─".repeat(RULE_WIDTH);

    println!("\n{}", rule);
    println!("Data Quality Summary");
    println!("{}\n", rule);
    println!("{}", summary_table(layer));

    let mut failures = layer.with_status(Status::Fail).peekable();
    if failures.peek().is_some() {
        println!("\nCRITICAL FAILURES:");
        println!("{}", thin);
        for v in failures {
            println!("\n[{}] {} - {}", v.rule_id, v.rule_name, v.severity);
            println!(
                "  Violations: {} (threshold: {})",
                v.violation_count, v.threshold
            );
            println!("  Impact: {}", v.impact);
            if !v.examples.is_empty() {
                let shown: Vec<&str> = v
                    .examples
                    .iter()
                    .take(CONSOLE_EXAMPLES)
                    .map(String::as_str)
                    .collect();
                println!("  Examples: {}", shown.join(", "));
            }
        }
    }

    let mut warnings = layer.with_status(Status::Warning).peekable();
    if warnings.peek().is_some() {
        println!("\n{}", thin);
        println!("WARNINGS:");
        println!("{}", thin);
        for v in warnings {
            println!("\n[{}] {}", v.rule_id, v.rule_name);
            println!(
                "  Violations: {} (threshold: {})",
                v.violation_count, v.threshold
            );
            println!("  Impact: {}", v.impact);
        }
    }

    let mut errors = layer.with_status(Status::Error).peekable();
    if errors.peek().is_some() {
        println!("\n{}", thin);
        println!("ERRORS:");
        println!("{}", thin);
        for v in errors {
            let reason = v.examples.first().map(String::as_str).unwrap_or("Error");
            println!("\n[{}] {}: {}", v.rule_id, v.rule_name, reason);
        }
    }

    println!("\n{}\n", rule);
}
