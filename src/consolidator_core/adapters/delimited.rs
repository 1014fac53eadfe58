//! Delimited-row adapter (first row is the header)

use super::FormatAdapter;
use crate::consolidator_core::error::SourceReadError;
use crate::consolidator_core::normalizer::{RawField, RawRow};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

pub struct DelimitedAdapter {
    delimiter: u8,
}

impl DelimitedAdapter {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn open(&self, path: &Path) -> Result<csv::Reader<File>, SourceReadError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(path)?;
        Ok(reader)
    }
}

impl FormatAdapter for DelimitedAdapter {
    fn read_columns(&self, path: &Path) -> Result<Vec<String>, SourceReadError> {
        let mut reader = self.open(path)?;
        let headers = reader.headers()?;
        Ok(headers.iter().map(|h| h.to_string()).collect())
    }

    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>, SourceReadError> {
        let mut reader = self.open(path)?;
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result?;
            if record.len() > headers.len() {
                log::debug!(
                    "{} row {} has {} fields for {} headers, extra fields ignored",
                    path.display(),
                    line + 1,
                    record.len(),
                    headers.len()
                );
            }
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| RawField::new(name, value))
                .collect();
            rows.push(row);
        }

        log::debug!("Read {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn format_name(&self) -> &'static str {
        if self.delimiter == b'\t' {
            "TSV"
        } else {
            "CSV"
        }
    }
}
