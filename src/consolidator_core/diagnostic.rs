//! Advisory diagnostics emitted while loading sources
//!
//! None of these halt the run. Each one is logged at `warn` when it is
//! recorded and kept for the run summary.

use super::format::FormatTag;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// Extension is known but no adapter exists for it yet
    UnsupportedFormat { source: PathBuf, format: FormatTag },
    /// Extension is not known at all
    UnrecognizedFormat { source: PathBuf },
    /// Source of a supported format could not be read; it contributes nothing
    SourceRead { source: PathBuf, reason: String },
    /// Value field did not coerce to an integer; the field was dropped
    FieldCoercion {
        source: PathBuf,
        column: String,
        value: String,
    },
    /// Field had no value element; the field was dropped
    MissingFieldValue { source: PathBuf, column: String },
    /// Record lacks a key field; the record was dropped
    MissingKeyField { source: PathBuf, column: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnsupportedFormat { source, format } => write!(
                f,
                "Format .{} is not supported yet, skipping {}",
                format.as_str(),
                source.display()
            ),
            Diagnostic::UnrecognizedFormat { source } => {
                write!(f, "File extension of {} is not supported", source.display())
            }
            Diagnostic::SourceRead { source, reason } => {
                write!(f, "Skipping unreadable source {}: {}", source.display(), reason)
            }
            Diagnostic::FieldCoercion {
                source,
                column,
                value,
            } => write!(
                f,
                "In {} column {} has invalid value '{}'",
                source.display(),
                column,
                value
            ),
            Diagnostic::MissingFieldValue { source, column } => {
                write!(f, "In {} column {} has no value", source.display(), column)
            }
            Diagnostic::MissingKeyField { source, column } => write!(
                f,
                "In {} a record lacks key column {}, record dropped",
                source.display(),
                column
            ),
        }
    }
}

impl Diagnostic {
    /// Log the diagnostic and hand it back for collection.
    pub fn emit(self) -> Self {
        log::warn!("⚠️  {}", self);
        self
    }
}
