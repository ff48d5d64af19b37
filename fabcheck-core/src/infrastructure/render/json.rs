// fabcheck-core/src/infrastructure/render/json.rs

use std::path::Path;
use tracing::info;

use super::ReportView;
use crate::application::RunReport;
use crate::application::ports::{RenderContext, ReportRenderer};
use crate::error::FabcheckError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::write_report;

/// Same view as the markdown report, as pretty JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &RunReport, context: &RenderContext) -> Result<String, FabcheckError> {
        let view = ReportView::build(report, context);
        let json = serde_json::to_string_pretty(&view).map_err(InfrastructureError::JsonError)?;
        Ok(json)
    }
}

pub fn write_json_results(
    path: &Path,
    report: &RunReport,
    context: &RenderContext,
) -> Result<(), FabcheckError> {
    let json = JsonRenderer.render(report, context)?;
    write_report(path, json)?;
    info!(path = ?path, "JSON results written");
    Ok(())
}
