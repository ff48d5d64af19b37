// fabcheck-core/src/application/ports/renderer.rs

use chrono::{Local, NaiveDateTime};

use crate::application::report::RunReport;
use crate::error::FabcheckError;

/// Run metadata shown next to the results.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub generated_at: NaiveDateTime,
    pub data_dir: String,
}

impl RenderContext {
    pub fn now(data_dir: impl Into<String>) -> Self {
        Self {
            generated_at: Local::now().naive_local(),
            data_dir: data_dir.into(),
        }
    }
}

pub trait ReportRenderer {
    fn render(&self, report: &RunReport, context: &RenderContext) -> Result<String, FabcheckError>;
}
