//! Export row shaping
//!
//! Turns a form definition plus its collected responses into a flat table:
//! one column per field in display order, one row per response. Byte-level
//! spreadsheet/PDF rendering happens server-side; this module only shapes
//! the rows (and can emit plain CSV for local use).

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::FormDefinition;

/// One stored response, as needed for tabulation.
#[derive(Clone, Debug)]
pub struct ResponseRecord {
    pub submitter_name: String,
    pub submitter_email: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub response_data: Map<String, Value>,
}

/// Flat tabular view of a form's responses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Render as CSV with minimal quoting.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        csv_line(&mut out, &self.headers);
        for row in &self.rows {
            csv_line(&mut out, row);
        }
        out
    }
}

/// Shape responses into a table. Headers are the submitter columns followed
/// by the field labels in display order; answers for fields a response never
/// saw render empty.
pub fn response_table(form: &FormDefinition, responses: &[ResponseRecord]) -> ExportTable {
    let mut headers = vec![
        "Submitter".to_string(),
        "Email".to_string(),
        "Submitted at".to_string(),
    ];
    headers.extend(form.fields.iter().map(|field| field.label.clone()));

    let rows = responses
        .iter()
        .map(|record| {
            let mut row = vec![
                record.submitter_name.clone(),
                record.submitter_email.clone().unwrap_or_default(),
                record.submitted_at.to_rfc3339(),
            ];
            row.extend(form.fields.iter().map(|field| {
                record
                    .response_data
                    .get(field.id.as_str())
                    .map(display_value)
                    .unwrap_or_default()
            }));
            row
        })
        .collect();

    ExportTable { headers, rows }
}

/// Scalars render verbatim; checkbox arrays join with ", ".
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn csv_line(out: &mut String, cells: &[String]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if cell.contains([',', '"', '\n']) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}
