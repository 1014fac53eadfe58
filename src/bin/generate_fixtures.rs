//! Fixture Generator Binary
//!
//! Writes csv_data_1.csv, csv_data_2.csv, json_data.json, xml_data.xml and the
//! matching basic_expected.tsv / advanced_expected.tsv.
//!
//! ## Environment Variables
//!
//! - TALLYFLOW_FIXTURE_DIR - Output directory (default: .)
//! - TALLYFLOW_FIXTURE_SEED - RNG seed (default: current time)
//! - RUST_LOG - Logging level (optional, default: info)

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tallyflow::fixtures::{generate, FixtureConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let dir: PathBuf = std::env::var("TALLYFLOW_FIXTURE_DIR")
        .unwrap_or_else(|_| ".".to_string())
        .into();
    let seed = std::env::var("TALLYFLOW_FIXTURE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    let config = FixtureConfig {
        seed,
        ..FixtureConfig::default()
    };
    log::info!("🎲 Generating fixtures (seed {}) into {}", seed, dir.display());

    let set = generate(&config);
    let written = set.write_to(&dir)?;

    log::info!(
        "✅ {} distinct keys, {} entries, {} files",
        set.table.len(),
        set.entries.len(),
        written.len()
    );
    Ok(())
}
