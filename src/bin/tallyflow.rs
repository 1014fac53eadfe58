//! Tallyflow Binary - one consolidation run
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin tallyflow
//! ```
//!
//! ## Environment Variables
//!
//! - TALLYFLOW_SOURCES - Comma-separated source files (default: csv_data_1.csv,csv_data_2.csv,json_data.json,xml_data.xml)
//! - TALLYFLOW_REFERENCE - Source supplying the column names (default: xml_data.xml)
//! - TALLYFLOW_BASIC_OUTPUT - Report with every record (default: basic_results.tsv)
//! - TALLYFLOW_ADVANCED_OUTPUT - Report with duplicates summed (default: advanced_results.tsv)
//! - TALLYFLOW_KEY_PREFIX / TALLYFLOW_VALUE_PREFIX - Column role prefixes (default: D / M)
//! - RUST_LOG - Logging level (optional, default: info)

use tallyflow::pipeline::{PipelineConfig, PipelineEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = PipelineConfig::from_env()?;

    log::info!("🚀 Starting Tallyflow");
    log::info!("   Sources: {}", config.sources.len());
    for source in &config.sources {
        log::info!("     - {}", source.display());
    }
    log::info!("   Reference: {}", config.reference.display());
    log::info!("   Basic output: {}", config.basic_output.display());
    log::info!("   Advanced output: {}", config.advanced_output.display());

    let engine = PipelineEngine::new(config)?;
    let summary = engine.run()?;

    if !summary.diagnostics.is_empty() {
        log::warn!("⚠️  {} diagnostics raised during the run", summary.diagnostics.len());
    }
    log::debug!("Run summary: {}", serde_json::to_string(&summary)?);

    Ok(())
}
