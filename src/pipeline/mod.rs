//! # Consolidation Pipeline
//!
//! Batch, single-threaded: every source is read to completion before the next
//! one starts, and aggregation runs only after all sources are loaded.
//!
//! A run either writes both reports or fails before writing anything when
//! the reference schema cannot be resolved. Problems confined to one source
//! or one field are logged and collected in the `RunSummary`.
//!
//! ## Module Organization
//!
//! - `config` - Run configuration (defaults + environment overrides)
//! - `engine` - Stage orchestration and run summary

pub mod config;
pub mod engine;

pub use config::{ConfigError, PipelineConfig};
pub use engine::{run, PipelineEngine, PipelineError, RunSummary};
