use crate::error::{KinshipError, Result};
use crate::types::KinshipReport;

/// Report generator for creating various output formats
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a report in the specified format
    pub fn generate(&self, report: &KinshipReport, format: &str) -> Result<String> {
        match format.to_lowercase().as_str() {
            "json" => self.generate_json(report),
            "markdown" => Ok(self.generate_markdown(report)),
            "text" => Ok(self.generate_text(report)),
            other => Err(KinshipError::format(other)),
        }
    }

    /// Generate JSON format report
    fn generate_json(&self, report: &KinshipReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Generate Markdown format report
    fn generate_markdown(&self, report: &KinshipReport) -> String {
        format!(
            r#"# Kinship Report

**Person 1**: {} (generation {})
**Person 2**: {} (generation {})

## Relationship
- **Common Ancestor**: {}
- **Generational Distance**: {}
- **Consanguinity**: {}

---
*Generated at: {}*
"#,
            report.id1,
            report.depth1,
            report.id2,
            report.depth2,
            report.common_ancestor.as_deref().unwrap_or("none"),
            report.distance,
            report.relationship,
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }

    /// Generate plain text format report
    fn generate_text(&self, report: &KinshipReport) -> String {
        format!(
            r#"Kinship Report
==============

Person 1: {} (generation {})
Person 2: {} (generation {})

Common Ancestor: {}
Generational Distance: {}
Consanguinity: {}

Generated at: {}
"#,
            report.id1,
            report.depth1,
            report.id2,
            report.depth2,
            report.common_ancestor.as_deref().unwrap_or("none"),
            report.distance,
            report.relationship,
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
