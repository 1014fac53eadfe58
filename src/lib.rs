//! Tallyflow - consolidates measurement records from CSV, TSV, XML and JSON
//! sources into a full report and a deduplicated, summed report.

pub mod consolidator_core;
pub mod fixtures;
pub mod pipeline;

pub use consolidator_core::{ColumnSchema, Diagnostic, SchemaError};
pub use pipeline::{run, PipelineConfig, PipelineEngine, PipelineError, RunSummary};
