//! Tab-separated report rendering and persistence

use super::aggregation::{DeduplicatedTable, OrderedDataset};
use super::error::ReportError;
use super::schema::ColumnSchema;
use std::path::Path;

const DELIMITER: &str = "\t";

/// The two reports produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Every record, duplicates intact
    Basic,
    /// Duplicates merged by summation
    Advanced,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Basic => "basic",
            ReportKind::Advanced => "advanced",
        }
    }

    pub fn default_filename(&self) -> &'static str {
        match self {
            ReportKind::Basic => "basic_results.tsv",
            ReportKind::Advanced => "advanced_results.tsv",
        }
    }
}

fn render_row(key: &[String], values: &[i64]) -> String {
    key.iter()
        .cloned()
        .chain(values.iter().map(|v| v.to_string()))
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

fn with_header<I>(schema: &ColumnSchema, rows: I) -> String
where
    I: Iterator<Item = String>,
{
    let header = schema.names().collect::<Vec<_>>().join(DELIMITER);
    let body = rows.collect::<Vec<_>>().join("\n");
    format!("{}\n{}", header, body)
}

/// Header line, then one line per dataset entry.
pub fn render_ordered(schema: &ColumnSchema, dataset: &OrderedDataset) -> String {
    with_header(
        schema,
        dataset
            .entries()
            .iter()
            .map(|entry| render_row(&entry.key, &entry.values)),
    )
}

/// Header line, then one line per distinct key in table order.
pub fn render_deduplicated(schema: &ColumnSchema, table: &DeduplicatedTable) -> String {
    with_header(
        schema,
        table.iter().map(|(key, values)| render_row(key, values)),
    )
}

/// Replace `path` with `text`.
pub fn persist(path: &Path, text: &str) -> Result<(), ReportError> {
    std::fs::write(path, text).map_err(|error| ReportError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    log::info!("📝 Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}
