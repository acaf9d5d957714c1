//! Report rendering
//!
//! Turns diffs and parsed schemas into text for the terminal, or into JSON or
//! YAML documents for other tools.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::schema::diff::Diff;
use crate::schema::types::Schema;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Serialize)]
struct SchemaDump<'a> {
    a: &'a Schema,
    b: &'a Schema,
}

#[derive(Serialize)]
struct DiffReport<'a> {
    a: &'a str,
    b: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    schemas: Option<SchemaDump<'a>>,
    diffs: &'a [Diff],
}

/// Render diffs with `label_a` and `label_b` naming the two sources
pub fn render_diffs(
    diffs: &[Diff],
    label_a: &str,
    label_b: &str,
    format: ReportFormat,
) -> Result<String> {
    render_report(diffs, label_a, label_b, None, format)
}

/// Render diffs, preceded by both parsed schemas when `schemas` is given.
///
/// JSON and YAML always produce a single document; the schemas go under a
/// `schemas` key next to the diffs.
pub fn render_report(
    diffs: &[Diff],
    label_a: &str,
    label_b: &str,
    schemas: Option<(&Schema, &Schema)>,
    format: ReportFormat,
) -> Result<String> {
    let report = DiffReport {
        a: label_a,
        b: label_b,
        schemas: schemas.map(|(a, b)| SchemaDump { a, b }),
        diffs,
    };

    match format {
        ReportFormat::Table => {
            let mut out = String::new();
            if let Some((schema_a, schema_b)) = schemas {
                for (label, schema) in [(label_a, schema_a), (label_b, schema_b)] {
                    out.push_str(&format!("Schema: {}\n\n{}\n", label, schema_table(schema)));
                }
            }

            let mut rows = vec![vec!["Type", "Target", label_a, label_b]];
            rows.extend(diffs.iter().map(|d| {
                vec![d.kind.as_str(), d.target.as_str(), d.a.as_str(), d.b.as_str()]
            }));
            out.push_str(&format!("Diffs\n\n{}", align_rows(&rows)));
            Ok(out)
        }
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&report)? + "\n"),
        ReportFormat::Yaml => Ok(serde_yaml::to_string(&report)?),
    }
}

/// Render a parsed schema for inspection
pub fn render_schema(schema: &Schema, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Table => Ok(schema_table(schema)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(schema)? + "\n"),
        ReportFormat::Yaml => Ok(serde_yaml::to_string(schema)?),
    }
}

fn schema_table(schema: &Schema) -> String {
    let mut out = String::new();
    for table in schema.tables.values() {
        let rows: Vec<Vec<&str>> = table
            .columns
            .values()
            .map(|c| vec![c.name.as_str(), c.data_type.as_str(), c.other.as_str()])
            .collect();
        out.push_str(&format!("Table: {}\n{}\n", table.name, align_rows(&rows)));
    }
    out
}

/// Pad every cell to its column's display width and join with ` | `
fn align_rows(rows: &[Vec<&str>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| UnicodeWidthStr::width(*cell))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                line.push_str(" | ");
            }
            line.push_str(cell);
            let pad = widths[i].saturating_sub(UnicodeWidthStr::width(*cell));
            line.extend(std::iter::repeat(' ').take(pad));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
