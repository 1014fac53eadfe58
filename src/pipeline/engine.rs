//! Pipeline Engine - one consolidation run
//!
//! ```text
//! PipelineConfig
//!     ↓
//! resolve(reference)            (fatal on failure, before any output)
//!     ↓
//! load_all(sources)             (per-source and per-field problems become diagnostics)
//!     ↓
//! build_ordered_dataset → render_ordered → persist(basic_output)
//!     ↓
//! build_deduplicated_table → render_deduplicated → persist(advanced_output)
//! ```

use super::config::{ConfigError, PipelineConfig};
use crate::consolidator_core::{
    build_deduplicated_table, build_ordered_dataset, load_all, persist, render_deduplicated,
    render_ordered, resolve, AdapterRegistry, Column, Diagnostic, ReportError, ReportKind,
    SchemaError, SourceReport,
};
use serde::Serialize;

#[derive(Debug)]
pub enum PipelineError {
    Config(ConfigError),
    Schema(SchemaError),
    Report(ReportError),
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        PipelineError::Config(err)
    }
}

impl From<SchemaError> for PipelineError {
    fn from(err: SchemaError) -> Self {
        PipelineError::Schema(err)
    }
}

impl From<ReportError> for PipelineError {
    fn from(err: ReportError) -> Self {
        PipelineError::Report(err)
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Config(e) => write!(f, "Config error: {}", e),
            PipelineError::Schema(e) => write!(f, "Schema error: {}", e),
            PipelineError::Report(e) => write!(f, "Report error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

/// What a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub columns: Vec<Column>,
    /// Entries in the basic report
    pub ordered_entries: usize,
    /// Distinct keys in the advanced report
    pub distinct_keys: usize,
    pub sources: Vec<SourceReport>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the schema → load → aggregate → report stages for one config.
pub struct PipelineEngine {
    config: PipelineConfig,
    registry: AdapterRegistry,
}

impl PipelineEngine {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: AdapterRegistry::new(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let config = &self.config;

        let schema = resolve(&config.reference, &self.registry, &config.prefixes)?;

        let loaded = load_all(&config.sources, &schema, &self.registry);
        log::info!(
            "📊 Loaded {} records from {} sources ({} diagnostics)",
            loaded.records.len(),
            config.sources.len(),
            loaded.diagnostics.len()
        );

        let dataset = build_ordered_dataset(&loaded.records, &schema);
        let table = build_deduplicated_table(&dataset);

        let reports = [
            (
                ReportKind::Basic,
                &config.basic_output,
                render_ordered(&schema, &dataset),
            ),
            (
                ReportKind::Advanced,
                &config.advanced_output,
                render_deduplicated(&schema, &table),
            ),
        ];
        for (kind, path, text) in &reports {
            log::debug!("Persisting {} report", kind.as_str());
            persist(path, text)?;
        }

        log::info!(
            "✅ Consolidated {} entries into {} distinct keys",
            dataset.len(),
            table.len()
        );

        Ok(RunSummary {
            columns: schema.columns().to_vec(),
            ordered_entries: dataset.len(),
            distinct_keys: table.len(),
            sources: loaded.sources,
            diagnostics: loaded.diagnostics,
        })
    }
}

/// Validate `config` and run it once.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    PipelineEngine::new(config.clone())?.run()
}
