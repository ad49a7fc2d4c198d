use crate::error::Result;
use crate::types::KinshipReport;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Tabular exporter writing ordered rows of (key, value) mappings as
/// delimited text: a header row from the first row's keys, then one
/// line per row, quoting any value that contains the delimiter, a
/// quote, or a newline. An empty input is a no-op with a diagnostic,
/// not an error.
pub struct CsvExporter {
    delimiter: char,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render rows into one delimited document
    pub fn render(&self, rows: &[Vec<(String, String)>]) -> String {
        let Some(first) = rows.first() else {
            warn!("No data to export");
            return String::new();
        };

        let mut out = String::new();
        let header: Vec<&str> = first.iter().map(|(key, _)| key.as_str()).collect();
        self.push_line(&mut out, &header);

        for row in rows {
            let values: Vec<&str> = row.iter().map(|(_, value)| value.as_str()).collect();
            self.push_line(&mut out, &values);
        }
        out
    }

    /// Render rows and write them to a file
    pub fn export_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        rows: &[Vec<(String, String)>],
    ) -> Result<()> {
        if rows.is_empty() {
            warn!("No data to export");
            return Ok(());
        }

        fs::write(path.as_ref(), self.render(rows))?;
        info!("Exported {} rows to {}", rows.len(), path.as_ref().display());
        Ok(())
    }

    fn push_line(&self, out: &mut String, fields: &[&str]) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            out.push_str(&self.quote(field));
        }
        out.push('\n');
    }

    fn quote(&self, field: &str) -> String {
        if field.contains(self.delimiter) || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

/// Convert reports into ordered export rows, one per report
pub fn report_rows(reports: &[KinshipReport]) -> Vec<Vec<(String, String)>> {
    reports
        .iter()
        .map(|report| {
            vec![
                ("ID1".to_string(), report.id1.clone()),
                ("ID2".to_string(), report.id2.clone()),
                (
                    "CommonAncestor".to_string(),
                    report.common_ancestor.clone().unwrap_or_default(),
                ),
                ("Distance".to_string(), report.distance.to_string()),
                ("Consanguinity".to_string(), report.relationship.to_string()),
            ]
        })
        .collect()
}
