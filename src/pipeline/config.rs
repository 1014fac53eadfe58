//! Run configuration from environment variables

use crate::consolidator_core::schema::RolePrefixes;
use crate::consolidator_core::tsv_writer::ReportKind;
use std::env;
use std::path::PathBuf;

/// Configuration for one consolidation run
///
/// Defaults reproduce the historic fixed run; every field can be overridden
/// from the environment.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source files, in load order
    pub sources: Vec<PathBuf>,

    /// Source read once for the column names
    pub reference: PathBuf,

    /// Report with every record
    pub basic_output: PathBuf,

    /// Report with duplicates merged
    pub advanced_output: PathBuf,

    /// Name prefixes selecting key and value columns
    pub prefixes: RolePrefixes,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                PathBuf::from("csv_data_1.csv"),
                PathBuf::from("csv_data_2.csv"),
                PathBuf::from("json_data.json"),
                PathBuf::from("xml_data.xml"),
            ],
            reference: PathBuf::from("xml_data.xml"),
            basic_output: PathBuf::from(ReportKind::Basic.default_filename()),
            advanced_output: PathBuf::from(ReportKind::Advanced.default_filename()),
            prefixes: RolePrefixes::default(),
        }
    }
}

fn parse_list(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

impl PipelineConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `TALLYFLOW_SOURCES` (comma-separated, default: csv_data_1.csv,csv_data_2.csv,json_data.json,xml_data.xml)
    /// - `TALLYFLOW_REFERENCE` (default: xml_data.xml)
    /// - `TALLYFLOW_BASIC_OUTPUT` (default: basic_results.tsv)
    /// - `TALLYFLOW_ADVANCED_OUTPUT` (default: advanced_results.tsv)
    /// - `TALLYFLOW_KEY_PREFIX` (default: D)
    /// - `TALLYFLOW_VALUE_PREFIX` (default: M)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sources = match env::var("TALLYFLOW_SOURCES") {
            Ok(list) => parse_list(&list),
            Err(_) => defaults.sources,
        };

        let config = Self {
            sources,
            reference: env::var("TALLYFLOW_REFERENCE")
                .map(PathBuf::from)
                .unwrap_or(defaults.reference),
            basic_output: env::var("TALLYFLOW_BASIC_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.basic_output),
            advanced_output: env::var("TALLYFLOW_ADVANCED_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.advanced_output),
            prefixes: RolePrefixes {
                key: env::var("TALLYFLOW_KEY_PREFIX").unwrap_or(defaults.prefixes.key),
                value: env::var("TALLYFLOW_VALUE_PREFIX").unwrap_or(defaults.prefixes.value),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::InvalidValue(
                "source list cannot be empty".to_string(),
            ));
        }

        let RolePrefixes { key, value } = &self.prefixes;
        if key.is_empty() || value.is_empty() {
            return Err(ConfigError::InvalidValue(
                "key and value prefixes cannot be empty".to_string(),
            ));
        }
        if key.starts_with(value.as_str()) || value.starts_with(key.as_str()) {
            return Err(ConfigError::InvalidValue(format!(
                "prefixes '{}' and '{}' overlap",
                key, value
            )));
        }

        if !self.sources.contains(&self.reference) {
            log::warn!(
                "Reference source {} is not among the configured sources",
                self.reference.display()
            );
        }

        Ok(())
    }
}
