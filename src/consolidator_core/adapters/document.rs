//! JSON document adapter: `{"fields": [{"D1": "a", "M1": 3}, ...]}`

use super::FormatAdapter;
use crate::consolidator_core::error::SourceReadError;
use crate::consolidator_core::normalizer::{RawField, RawRow};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FieldsDocument {
    fields: Vec<Map<String, Value>>,
}

pub struct DocumentAdapter;

impl DocumentAdapter {
    fn load(&self, path: &Path) -> Result<FieldsDocument, SourceReadError> {
        let file = File::open(path)?;
        let document: FieldsDocument = serde_json::from_reader(BufReader::new(file))?;
        Ok(document)
    }
}

fn to_raw_field(name: String, value: Value) -> RawField {
    match value {
        Value::Null => RawField::without_value(name),
        Value::String(s) => RawField::new(name, s),
        other => RawField::new(name, other.to_string()),
    }
}

impl FormatAdapter for DocumentAdapter {
    fn read_columns(&self, path: &Path) -> Result<Vec<String>, SourceReadError> {
        let document = self.load(path)?;
        Ok(document
            .fields
            .into_iter()
            .next()
            .map(|object| object.into_iter().map(|(name, _)| name).collect())
            .unwrap_or_default())
    }

    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>, SourceReadError> {
        let document = self.load(path)?;
        let rows: Vec<RawRow> = document
            .fields
            .into_iter()
            .map(|object| {
                object
                    .into_iter()
                    .map(|(name, value)| to_raw_field(name, value))
                    .collect()
            })
            .collect();

        log::debug!("Read {} objects from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}
