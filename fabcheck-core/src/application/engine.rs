// fabcheck-core/src/application/engine.rs

use tracing::{debug, info, instrument, warn};

use crate::application::report::{LayerReport, RunReport, TableSummary};
use crate::domain::ports::DatasetSource;
use crate::domain::quality::{
    Check, Layer, LayerSnapshot, Rule, RuleCatalog, Verdict, Violation, resolve,
};
use crate::error::FabcheckError;

/// A rule paired with the check its target resolved to.
pub struct PlannedRule {
    rule: Rule,
    check: Box<dyn Check>,
}

impl PlannedRule {
    pub fn new(rule: Rule) -> Self {
        let check = resolve(&rule.target);
        Self { rule, check }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn check_name(&self) -> &'static str {
        self.check.name()
    }
}

/// Runs the catalog against one layer at a time and keeps every layer's
/// verdicts in a `RunReport`.
pub struct QualityEngine<D> {
    plan: Vec<PlannedRule>,
    datasets: D,
    report: RunReport,
}

impl<D: DatasetSource> QualityEngine<D> {
    /// The catalog is already validated; checks are resolved here, once.
    pub fn new(catalog: RuleCatalog, datasets: D) -> Self {
        let plan = catalog
            .rules()
            .iter()
            .cloned()
            .map(PlannedRule::new)
            .collect();

        Self {
            plan,
            datasets,
            report: RunReport::new(),
        }
    }

    pub fn plan_for(&self, layer: Layer) -> impl Iterator<Item = &PlannedRule> {
        self.plan.iter().filter(move |p| p.rule.applies_to(layer))
    }

    /// Loads the layer once and evaluates every applicable rule in catalog
    /// order. A failing check becomes an ERROR verdict; only a dataset
    /// source failure is returned as an error.
    #[instrument(skip_all, fields(layer = %layer))]
    pub fn run(&mut self, layer: Layer) -> Result<&LayerReport, FabcheckError> {
        let snapshot = self.datasets.load_layer(layer)?;

        if snapshot.is_empty() {
            warn!("No data found in {} layer", layer);
            return Ok(self.report.record(LayerReport::no_data(layer)));
        }

        let tables = snapshot
            .tables()
            .map(|t| TableSummary {
                name: t.name().to_string(),
                rows: t.row_count(),
            })
            .collect();
        info!(tables = snapshot.len(), "Layer snapshot loaded");

        let mut layer_report = LayerReport::evaluated(layer, tables);
        for planned in self.plan_for(layer) {
            layer_report.push(evaluate_rule(planned, &snapshot));
        }

        let counts = layer_report.counts();
        info!(
            passed = counts.passed,
            warnings = counts.warnings,
            failed = counts.failed,
            errors = counts.errors,
            "Layer evaluated"
        );

        Ok(self.report.record(layer_report))
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn into_report(self) -> RunReport {
        self.report
    }
}

fn evaluate_rule(planned: &PlannedRule, snapshot: &LayerSnapshot) -> Verdict {
    let rule = planned.rule();

    if !rule.target.is_recognized() {
        debug!(rule = %rule.id, target = %rule.target, "No check matches target, evaluating as no-op");
    }

    let violation = match planned.check.evaluate(snapshot) {
        Ok(violation) => violation,
        Err(e) => {
            warn!(rule = %rule.id, error = %e, "Error executing rule");
            Violation::from_error(&e)
        }
    };

    let verdict = Verdict::new(rule, violation);
    debug!(
        rule = %verdict.rule_id,
        check = planned.check_name(),
        status = %verdict.status,
        violations = verdict.violation_count,
        "Rule evaluated"
    );
    verdict
}
