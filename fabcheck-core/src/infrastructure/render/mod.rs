// fabcheck-core/src/infrastructure/render/mod.rs

pub mod json;
pub mod markdown;

pub use json::{JsonRenderer, write_json_results};
pub use markdown::MarkdownRenderer;

use serde::Serialize;

use crate::application::ports::RenderContext;
use crate::application::{LayerReport, RunReport, StatusCounts, TableSummary};
use crate::domain::quality::Verdict;

// --- DTOs ---
// What the report templates see. Built from the RunReport, never stored.

#[derive(Serialize)]
pub(crate) struct ReportView<'a> {
    pub generated_at: String,
    pub data_dir: &'a str,
    pub layers: Vec<LayerView<'a>>,
}

#[derive(Serialize)]
pub(crate) struct LayerView<'a> {
    pub layer: &'static str,
    pub has_data: bool,
    pub counts: StatusCounts,
    pub tables: &'a [TableSummary],
    pub verdicts: Vec<VerdictView<'a>>,
}

#[derive(Serialize)]
pub(crate) struct VerdictView<'a> {
    #[serde(flatten)]
    pub verdict: &'a Verdict,
    pub icon: &'static str,
}

impl<'a> ReportView<'a> {
    pub fn build(report: &'a RunReport, context: &'a RenderContext) -> Self {
        Self {
            generated_at: context.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            data_dir: &context.data_dir,
            layers: report.layers().iter().map(LayerView::build).collect(),
        }
    }
}

impl<'a> LayerView<'a> {
    fn build(layer: &'a LayerReport) -> Self {
        Self {
            layer: layer.layer().as_str(),
            has_data: layer.has_data(),
            counts: layer.counts(),
            tables: layer.tables(),
            verdicts: layer
                .verdicts()
                .iter()
                .map(|verdict| VerdictView {
                    verdict,
                    icon: verdict.status.icon(),
                })
                .collect(),
        }
    }
}
