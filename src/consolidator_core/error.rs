//! Error types for schema resolution, source reading and report output

use std::path::PathBuf;

/// Fatal: the reference source could not supply a column schema.
#[derive(Debug)]
pub enum SchemaError {
    Unreadable { source: PathBuf, error: SourceReadError },
    Unsupported { source: PathBuf, reason: String },
    Empty { source: PathBuf },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::Unreadable { source, error } => {
                write!(f, "Reference source {} is unreadable: {}", source.display(), error)
            }
            SchemaError::Unsupported { source, reason } => {
                write!(f, "Reference source {} is unsupported: {}", source.display(), reason)
            }
            SchemaError::Empty { source } => {
                write!(f, "Reference source {} yields no columns", source.display())
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Malformed content in a source of a recognized format.
///
/// Recovered per source: the loader skips the source and records a diagnostic.
#[derive(Debug)]
pub enum SourceReadError {
    Io(std::io::Error),
    Delimited(csv::Error),
    Tree(String),
    Document(serde_json::Error),
    Malformed(String),
}

impl From<std::io::Error> for SourceReadError {
    fn from(err: std::io::Error) -> Self {
        SourceReadError::Io(err)
    }
}

impl From<csv::Error> for SourceReadError {
    fn from(err: csv::Error) -> Self {
        SourceReadError::Delimited(err)
    }
}

impl From<serde_json::Error> for SourceReadError {
    fn from(err: serde_json::Error) -> Self {
        SourceReadError::Document(err)
    }
}

impl std::fmt::Display for SourceReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceReadError::Io(e) => write!(f, "IO error: {}", e),
            SourceReadError::Delimited(e) => write!(f, "Delimited row error: {}", e),
            SourceReadError::Tree(e) => write!(f, "XML error: {}", e),
            SourceReadError::Document(e) => write!(f, "JSON error: {}", e),
            SourceReadError::Malformed(e) => write!(f, "Malformed source: {}", e),
        }
    }
}

impl std::error::Error for SourceReadError {}

/// Failure while persisting a rendered report.
#[derive(Debug)]
pub enum ReportError {
    Io { path: PathBuf, error: std::io::Error },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io { path, error } => {
                write!(f, "Failed to write {}: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for ReportError {}
