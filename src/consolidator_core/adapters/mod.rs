//! Format adapters
//!
//! Every supported format implements both capabilities: reading the column
//! names of the first logical row, and reading all rows. Dispatch goes through
//! a fixed tag-to-adapter registry; the `.yaml` placeholder has no entry.

pub mod delimited;
pub mod document;
pub mod tree;

pub use delimited::DelimitedAdapter;
pub use document::DocumentAdapter;
pub use tree::TreeAdapter;

use super::diagnostic::Diagnostic;
use super::error::SourceReadError;
use super::format::FormatTag;
use super::normalizer::{normalize_row, RawRecord, RawRow};
use super::schema::ColumnSchema;
use std::collections::HashMap;
use std::path::Path;

/// Records adapted from one source plus the diagnostics raised on the way.
#[derive(Debug, Default)]
pub struct AdaptedSource {
    pub records: Vec<RawRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

pub trait FormatAdapter {
    /// Field names of the first logical row/object, in source order.
    fn read_columns(&self, path: &Path) -> Result<Vec<String>, SourceReadError>;

    /// Every row/object of the source, unfiltered.
    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>, SourceReadError>;

    /// Get format name for logging
    fn format_name(&self) -> &'static str;

    /// Rows of the source filtered and coerced against `schema`.
    fn read_records(
        &self,
        path: &Path,
        schema: &ColumnSchema,
    ) -> Result<AdaptedSource, SourceReadError> {
        let mut adapted = AdaptedSource::default();
        for row in self.read_rows(path)? {
            let (record, diagnostics) = normalize_row(path, row, schema);
            adapted.diagnostics.extend(diagnostics);
            if let Some(record) = record {
                adapted.records.push(record);
            }
        }
        Ok(adapted)
    }
}

/// Fixed mapping from format tag to adapter.
pub struct AdapterRegistry {
    adapters: HashMap<FormatTag, Box<dyn FormatAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        let mut adapters: HashMap<FormatTag, Box<dyn FormatAdapter>> = HashMap::new();
        adapters.insert(FormatTag::Csv, Box::new(DelimitedAdapter::new(b',')));
        adapters.insert(FormatTag::Tsv, Box::new(DelimitedAdapter::new(b'\t')));
        adapters.insert(FormatTag::Xml, Box::new(TreeAdapter));
        adapters.insert(FormatTag::Json, Box::new(DocumentAdapter));
        Self { adapters }
    }

    /// Adapter for `tag`, or `None` when the format is recognized but unimplemented.
    pub fn adapter_for(&self, tag: FormatTag) -> Option<&dyn FormatAdapter> {
        self.adapters.get(&tag).map(|a| a.as_ref())
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
