// fabcheck-core/src/infrastructure/render/markdown.rs

use minijinja::Environment;

use super::ReportView;
use crate::application::RunReport;
use crate::application::ports::{RenderContext, ReportRenderer};
use crate::error::FabcheckError;
use crate::infrastructure::error::InfrastructureError;

const REPORT_TEMPLATE: &str = r#"# Data Quality Validation Report

**Generated:** {{ generated_at }}

**Data Directory:** {{ data_dir }}

---

{% for layer in layers %}
## Layer: {{ layer.layer }}

{% if not layer.has_data %}
> No data found in the {{ layer.layer }} layer. No rule was evaluated.

{% else %}
{% if layer.tables %}
Tables: {% for t in layer.tables %}`{{ t.name }}` ({{ t.rows }} rows){% if not loop.last %}, {% endif %}{% endfor %}


{% endif %}
| Status | Count |
|--------|-------|
| ✅ Passed | {{ layer.counts.passed }} |
| ⚠️ Warnings | {{ layer.counts.warnings }} |
| ❌ Failed | {{ layer.counts.failed }} |
| ⚡ Errors | {{ layer.counts.errors }} |

### Detailed Results

{% for v in layer.verdicts %}
#### {{ v.icon }} [{{ v.rule_id }}] {{ v.rule_name }}

- **Category:** {{ v.category }}
- **Severity:** {{ v.severity }}
- **Status:** {{ v.status }}
- **Violations:** {{ v.violation_count }} (threshold: {{ v.threshold }})
- **Impact:** {{ v.impact }}
{% if v.examples %}
- **Examples:** {{ v.examples | join(", ") }}
{% endif %}

{% endfor %}
{% endif %}
---

{% endfor %}
"#;

pub struct MarkdownRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new() -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("report.md", REPORT_TEMPLATE)
            .map_err(InfrastructureError::TemplateError)?;
        Ok(Self { env })
    }
}

impl<'a> ReportRenderer for MarkdownRenderer<'a> {
    fn render(&self, report: &RunReport, context: &RenderContext) -> Result<String, FabcheckError> {
        let view = ReportView::build(report, context);
        let tmpl = self
            .env
            .get_template("report.md")
            .map_err(InfrastructureError::TemplateError)?;
        let rendered = tmpl
            .render(&view)
            .map_err(InfrastructureError::TemplateError)?;
        Ok(rendered)
    }
}
