// fabcheck-core/src/domain/quality/rule.rs

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use validator::Validate;

use super::target::TargetDescriptor;
use crate::domain::error::DomainError;

// --- ENUMS ---

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Raw,
    Staging,
    Curated,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Raw, Layer::Staging, Layer::Curated];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Raw => "raw",
            Layer::Staging => "staging",
            Layer::Curated => "curated",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Layer::Raw),
            "staging" => Ok(Layer::Staging),
            "curated" => Ok(Layer::Curated),
            _ => Err(DomainError::UnknownLayer(s.to_string())),
        }
    }
}

/// Rule family. Matching is exact: a value outside the known set is kept as
/// `Other` and its rules resolve to no check at all.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Category {
    ReferentialIntegrity,
    Range,
    Completeness,
    Uniqueness,
    Temporal,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::ReferentialIntegrity => "REFERENTIAL_INTEGRITY",
            Category::Range => "RANGE",
            Category::Completeness => "COMPLETENESS",
            Category::Uniqueness => "UNIQUENESS",
            Category::Temporal => "TEMPORAL",
            Category::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "REFERENTIAL_INTEGRITY" => Category::ReferentialIntegrity,
            "RANGE" => Category::Range,
            "COMPLETENESS" => Category::Completeness,
            "UNIQUENESS" => Category::Uniqueness,
            "TEMPORAL" => Category::Temporal,
            _ => Category::Other(raw),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Only the exact `CRITICAL` and `HIGH` values are blocking. Any other value
/// is kept verbatim and lands in the warning tier.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Other(raw) => raw,
        }
    }

    /// Severities that escalate an exceeded threshold to FAIL.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Other(raw),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// --- RAW RECORD (as read from the catalog file) ---

/// `layers: raw` and `layers: [raw, staging]` are both accepted.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum LayerSpec {
    One(String),
    Many(Vec<String>),
}

impl LayerSpec {
    fn tokens(&self) -> Vec<&str> {
        match self {
            LayerSpec::One(s) => s
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .collect(),
            LayerSpec::Many(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone, Default)]
pub struct RuleRecord {
    #[serde(alias = "rule_id")]
    #[validate(
        required(message = "missing required field 'id'"),
        length(min = 1, message = "field 'id' is empty")
    )]
    pub id: Option<String>,

    #[validate(
        required(message = "missing required field 'name'"),
        length(min = 1, message = "field 'name' is empty")
    )]
    pub name: Option<String>,

    #[validate(required(message = "missing required field 'category'"))]
    pub category: Option<String>,

    #[validate(required(message = "missing required field 'severity'"))]
    pub severity: Option<String>,

    #[validate(range(min = 0, message = "threshold must be a non-negative integer"))]
    pub threshold: Option<i64>,

    pub impact: Option<String>,

    #[serde(alias = "layer", alias = "applicable_layers")]
    pub layers: Option<LayerSpec>,

    /// Structured check target (see `TargetDescriptor::parse`).
    pub target: Option<String>,

    /// Legacy free-text query, only inspected when `target` is absent.
    pub check_sql: Option<String>,
}

impl RuleRecord {
    /// Validates the record and resolves it into an immutable `Rule`.
    /// `position` is only used to name records that have no id.
    pub fn into_rule(self, position: usize) -> Result<Rule, DomainError> {
        let label = self
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("#{}", position + 1));

        self.validate()
            .map_err(|e| DomainError::invalid_rule(&label, flatten_validation(&e)))?;

        let (Some(id), Some(name), Some(category), Some(severity)) =
            (self.id, self.name, self.category, self.severity)
        else {
            return Err(DomainError::invalid_rule(&label, "missing required field"));
        };

        let category = Category::from(category);
        let severity = Severity::from(severity);
        if !category.is_known() {
            warn!(rule = %id, category = %category, "Unknown category, rule will evaluate as a no-op");
        }

        let threshold = u64::try_from(self.threshold.unwrap_or(0)).map_err(|_| {
            DomainError::invalid_rule(&label, "threshold must be a non-negative integer")
        })?;

        let layers = match &self.layers {
            Some(spec) => {
                let mut set = BTreeSet::new();
                for token in spec.tokens() {
                    match Layer::from_str(token) {
                        Ok(layer) => {
                            set.insert(layer);
                        }
                        Err(e) => warn!(rule = %id, error = %e, "Ignoring layer token"),
                    }
                }
                set
            }
            None => BTreeSet::from([Layer::Staging]),
        };

        let target = match (&self.target, &self.check_sql) {
            (Some(key), _) => TargetDescriptor::parse(&category, key),
            (None, Some(sql)) => TargetDescriptor::infer_from_sql(&category, &name, sql),
            (None, None) => TargetDescriptor::Unrecognized(String::new()),
        };

        Ok(Rule {
            id,
            name,
            category,
            severity,
            threshold,
            impact: self.impact.unwrap_or_else(|| "N/A".to_string()),
            layers,
            target,
        })
    }
}

fn flatten_validation(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("field '{}' is invalid ({})", field, e.code),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

// --- RESOLVED RULE ---

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub severity: Severity,
    pub threshold: u64,
    pub impact: String,
    pub layers: BTreeSet<Layer>,
    pub target: TargetDescriptor,
}

impl Rule {
    pub fn applies_to(&self, layer: Layer) -> bool {
        self.layers.contains(&layer)
    }
}

// --- CATALOG ---

/// Ordered, validated rule list. Once built it is never mutated.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Fails on the first invalid record: a broken catalog must never
    /// reach the engine.
    pub fn from_records(records: Vec<RuleRecord>) -> Result<Self, DomainError> {
        let mut rules = Vec::with_capacity(records.len());
        let mut seen = HashSet::new();

        for (position, record) in records.into_iter().enumerate() {
            let rule = record.into_rule(position)?;
            if !seen.insert(rule.id.clone()) {
                return Err(DomainError::DuplicateRule(rule.id));
            }
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules applicable to `layer`, in catalog order.
    pub fn rules_for(&self, layer: Layer) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.applies_to(layer))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(id: &str) -> RuleRecord {
        RuleRecord {
            id: Some(id.into()),
            name: Some(format!("Rule {}", id)),
            category: Some("RANGE".into()),
            severity: Some("HIGH".into()),
            target: Some("temperature".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let rule = record("DQ001").into_rule(0).unwrap();
        assert_eq!(rule.threshold, 0);
        assert_eq!(rule.impact, "N/A");
        assert_eq!(rule.layers, BTreeSet::from([Layer::Staging]));
        assert_eq!(rule.target, TargetDescriptor::Temperature);
    }

    #[test]
    fn test_missing_name_is_config_error() {
        let mut rec = record("DQ002");
        rec.name = None;
        let err = RuleCatalog::from_records(vec![record("DQ001"), rec]).unwrap_err();
        match err {
            DomainError::InvalidRule { rule, reason } => {
                assert_eq!(rule, "DQ002");
                assert!(reason.contains("name"), "reason was: {}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_id_uses_position_label() {
        let mut rec = record("ignored");
        rec.id = None;
        let err = RuleCatalog::from_records(vec![record("DQ001"), rec]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRule { ref rule, .. } if rule == "#2"));
    }

    #[test]
    fn test_missing_category_and_severity_rejected() {
        let mut rec = record("DQ003");
        rec.category = None;
        assert!(rec.into_rule(0).is_err());

        let mut rec = record("DQ004");
        rec.severity = None;
        assert!(rec.into_rule(0).is_err());
    }

    #[test]
    fn test_unknown_category_resolves_to_no_check() {
        let mut rec = record("DQ005");
        rec.category = Some("FRESHNESS".into());
        let rule = rec.into_rule(0).unwrap();
        assert_eq!(rule.category, Category::Other("FRESHNESS".into()));
        assert_eq!(rule.category.to_string(), "FRESHNESS");
        assert!(!rule.target.is_recognized());
    }

    #[test]
    fn test_unknown_severity_is_kept_and_not_blocking() {
        let mut rec = record("DQ900");
        rec.severity = Some("INFO".into());
        let catalog = RuleCatalog::from_records(vec![rec]).unwrap();
        let severity = &catalog.rules()[0].severity;
        assert_eq!(severity, &Severity::Other("INFO".into()));
        assert_eq!(severity.as_str(), "INFO");
        assert!(!severity.is_blocking());
    }

    #[test]
    fn test_severity_and_category_match_exact_case() {
        let mut rec = record("DQ901");
        rec.severity = Some("critical".into());
        rec.category = Some("range".into());
        let rule = rec.into_rule(0).unwrap();
        assert!(!rule.severity.is_blocking());
        assert_eq!(rule.category, Category::Other("range".into()));
        assert_eq!(rule.target, TargetDescriptor::Unrecognized("temperature".into()));
    }

    #[test]
    fn test_severity_serializes_verbatim() {
        let json = serde_json::to_string(&vec![Severity::Critical, Severity::Other("INFO".into())])
            .unwrap();
        assert_eq!(json, r#"["CRITICAL","INFO"]"#);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut rec = record("DQ006");
        rec.threshold = Some(-3);
        assert!(rec.into_rule(0).is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = RuleCatalog::from_records(vec![record("DQ001"), record("DQ001")]).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateRule(id) if id == "DQ001"));
    }

    #[test]
    fn test_layer_spec_string_and_list() {
        let mut rec = record("DQ007");
        rec.layers = Some(LayerSpec::One("raw, curated".into()));
        let rule = rec.into_rule(0).unwrap();
        assert!(rule.applies_to(Layer::Raw));
        assert!(rule.applies_to(Layer::Curated));
        assert!(!rule.applies_to(Layer::Staging));

        let mut rec = record("DQ008");
        rec.layers = Some(LayerSpec::Many(vec!["staging".into()]));
        let rule = rec.into_rule(0).unwrap();
        assert!(rule.applies_to(Layer::Staging));
    }

    #[test]
    fn test_unknown_layer_tokens_are_ignored() {
        let mut rec = record("DQ009");
        rec.layers = Some(LayerSpec::Many(vec!["raw".into(), "gold".into()]));
        let catalog = RuleCatalog::from_records(vec![rec]).unwrap();
        assert_eq!(catalog.rules()[0].layers, BTreeSet::from([Layer::Raw]));

        let mut rec = record("DQ010");
        rec.layers = Some(LayerSpec::One("gold".into()));
        let rule = rec.into_rule(0).unwrap();
        assert!(Layer::ALL.iter().all(|l| !rule.applies_to(*l)));
    }

    #[test]
    fn test_rules_for_keeps_catalog_order() {
        let mut a = record("B");
        a.layers = Some(LayerSpec::One("raw".into()));
        let mut b = record("A");
        b.layers = Some(LayerSpec::One("staging".into()));
        let mut c = record("C");
        c.layers = Some(LayerSpec::One("raw staging".into()));

        let catalog = RuleCatalog::from_records(vec![a, b, c]).unwrap();
        let ids: Vec<&str> = catalog
            .rules_for(Layer::Raw)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["B", "C"]);
    }

    #[test]
    fn test_legacy_sql_resolved_at_load() {
        let mut rec = record("DQ010");
        rec.target = None;
        rec.check_sql = Some("SELECT * FROM equipment_logs WHERE pressure_torr > 1000".into());
        let rule = rec.into_rule(0).unwrap();
        assert_eq!(rule.target, TargetDescriptor::Pressure);
    }

    #[test]
    fn test_deserialize_from_yaml_aliases() {
        let yaml = r#"
rule_id: DQ011
name: Wafer ID Completeness
category: COMPLETENESS
severity: MEDIUM
threshold: 2
layer: raw
target: wafer_id
"#;
        let rec: RuleRecord = serde_yaml::from_str(yaml).unwrap();
        let rule = rec.into_rule(0).unwrap();
        assert_eq!(rule.id, "DQ011");
        assert_eq!(rule.category, Category::Completeness);
        assert_eq!(rule.severity, Severity::Medium);
        assert_eq!(rule.threshold, 2);
        assert_eq!(rule.target, TargetDescriptor::WaferIdPresent);
    }
}
