//! Test-data generator
//!
//! Builds a random key → value table, splits some entries into two
//! duplicates whose values sum back to the original, and spreads the result
//! over one file per supported format. The expected reports are written next
//! to the inputs so a run can be checked against them.

use crate::consolidator_core::aggregation::{Entry, KeyTuple, OrderedDataset, ValueTuple};
use crate::consolidator_core::error::ReportError;
use crate::consolidator_core::schema::{ColumnSchema, RolePrefixes};
use crate::consolidator_core::tsv_writer::{persist, render_ordered};
use indexmap::IndexMap;
use quick_xml::escape::escape;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

/// Input files, in the order entries are dealt to them.
pub const SOURCE_FILES: [&str; 4] = [
    "csv_data_1.csv",
    "csv_data_2.csv",
    "json_data.json",
    "xml_data.xml",
];

pub const BASIC_EXPECTED: &str = "basic_expected.tsv";
pub const ADVANCED_EXPECTED: &str = "advanced_expected.tsv";

const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Random key tuples drawn (repeats collapse)
    pub rows: usize,
    /// Entries split into two duplicates
    pub extra_rows: usize,
    /// Key columns and value columns each
    pub columns: usize,
    /// Values are drawn from `0..=value_max`
    pub value_max: i64,
    pub seed: u64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            extra_rows: 5,
            columns: 3,
            value_max: 4,
            seed: 0,
        }
    }
}

#[derive(Debug)]
pub enum FixtureError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Report(ReportError),
}

impl From<std::io::Error> for FixtureError {
    fn from(err: std::io::Error) -> Self {
        FixtureError::Io(err)
    }
}

impl From<csv::Error> for FixtureError {
    fn from(err: csv::Error) -> Self {
        FixtureError::Csv(err)
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        FixtureError::Json(err)
    }
}

impl From<ReportError> for FixtureError {
    fn from(err: ReportError) -> Self {
        FixtureError::Report(err)
    }
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::Io(e) => write!(f, "IO error: {}", e),
            FixtureError::Csv(e) => write!(f, "CSV error: {}", e),
            FixtureError::Json(e) => write!(f, "JSON error: {}", e),
            FixtureError::Report(e) => write!(f, "Report error: {}", e),
        }
    }
}

impl std::error::Error for FixtureError {}

/// A generated data set, before it is written out.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub key_columns: Vec<String>,
    pub value_columns: Vec<String>,
    /// Distinct keys with their totals
    pub table: IndexMap<KeyTuple, ValueTuple>,
    /// All entries including split duplicates
    pub entries: Vec<Entry>,
    /// `entries` in the shuffled order used to fill the source files
    pub shuffled: Vec<Entry>,
}

pub fn generate(config: &FixtureConfig) -> FixtureSet {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let key_columns: Vec<String> = (1..=config.columns).map(|i| format!("D{}", i)).collect();
    let value_columns: Vec<String> = (1..=config.columns).map(|i| format!("M{}", i)).collect();

    let mut table = IndexMap::new();
    for _ in 0..config.rows {
        let key: KeyTuple = (0..config.columns)
            .map(|_| (KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char).to_string())
            .collect();
        let values: ValueTuple = (0..config.columns)
            .map(|_| rng.gen_range(0..=config.value_max))
            .collect();
        table.insert(key, values);
    }

    let mut entries: Vec<Entry> = table
        .iter()
        .map(|(key, values)| Entry {
            key: key.clone(),
            values: values.clone(),
        })
        .collect();

    for _ in 0..config.extra_rows {
        if entries.is_empty() {
            break;
        }
        let picked = entries.remove(rng.gen_range(0..entries.len()));
        let first: ValueTuple = picked.values.iter().map(|&v| rng.gen_range(0..=v)).collect();
        let second: ValueTuple = picked
            .values
            .iter()
            .zip(&first)
            .map(|(total, part)| total - part)
            .collect();
        entries.push(Entry {
            key: picked.key.clone(),
            values: first,
        });
        entries.push(Entry {
            key: picked.key,
            values: second,
        });
    }

    let mut shuffled = entries.clone();
    shuffled.shuffle(&mut rng);

    FixtureSet {
        key_columns,
        value_columns,
        table,
        entries,
        shuffled,
    }
}

impl FixtureSet {
    pub fn columns(&self) -> Vec<String> {
        self.key_columns
            .iter()
            .chain(&self.value_columns)
            .cloned()
            .collect()
    }

    fn schema(&self) -> ColumnSchema {
        ColumnSchema::from_names(self.columns(), &RolePrefixes::default())
    }

    /// Expected report with every entry.
    pub fn basic_text(&self) -> String {
        render_ordered(&self.schema(), &OrderedDataset::from_entries(self.entries.clone()))
    }

    /// Expected report with one line per key.
    pub fn advanced_text(&self) -> String {
        let entries = self
            .table
            .iter()
            .map(|(key, values)| Entry {
                key: key.clone(),
                values: values.clone(),
            })
            .collect();
        render_ordered(&self.schema(), &OrderedDataset::from_entries(entries))
    }

    /// Entries dealt round-robin to the `index`-th source file.
    pub fn chunk(&self, index: usize) -> Vec<&Entry> {
        self.shuffled
            .iter()
            .skip(index)
            .step_by(SOURCE_FILES.len())
            .collect()
    }

    /// Write the source files and expected reports into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, FixtureError> {
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for (index, name) in SOURCE_FILES.iter().enumerate() {
            let path = dir.join(name);
            let chunk = self.chunk(index);
            match index {
                0 | 1 => self.write_csv(&path, &chunk)?,
                2 => self.write_json(&path, &chunk)?,
                _ => self.write_xml(&path, &chunk)?,
            }
            log::info!("📝 Wrote {} entries to {}", chunk.len(), path.display());
            written.push(path);
        }

        let basic = dir.join(BASIC_EXPECTED);
        persist(&basic, &self.basic_text())?;
        let advanced = dir.join(ADVANCED_EXPECTED);
        persist(&advanced, &self.advanced_text())?;
        written.push(basic);
        written.push(advanced);

        Ok(written)
    }

    fn fields_of<'a>(&'a self, entry: &'a Entry) -> impl Iterator<Item = (&'a str, String)> + 'a {
        self.key_columns
            .iter()
            .zip(entry.key.iter().cloned())
            .chain(
                self.value_columns
                    .iter()
                    .zip(entry.values.iter().map(|v| v.to_string())),
            )
            .map(|(column, value)| (column.as_str(), value))
    }

    fn write_csv(&self, path: &Path, chunk: &[&Entry]) -> Result<(), FixtureError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(self.columns())?;
        for entry in chunk {
            writer.write_record(self.fields_of(entry).map(|(_, value)| value))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json(&self, path: &Path, chunk: &[&Entry]) -> Result<(), FixtureError> {
        let fields: Vec<Value> = chunk
            .iter()
            .map(|entry| {
                let mut object = Map::new();
                for (column, token) in self.key_columns.iter().zip(&entry.key) {
                    object.insert(column.clone(), Value::String(token.clone()));
                }
                for (column, value) in self.value_columns.iter().zip(&entry.values) {
                    object.insert(column.clone(), json!(value));
                }
                Value::Object(object)
            })
            .collect();

        let text = serde_json::to_string_pretty(&json!({ "fields": fields }))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    fn write_xml(&self, path: &Path, chunk: &[&Entry]) -> Result<(), FixtureError> {
        let mut text = String::from("<?xml version=\"1.0\" ?>\n<root>\n");
        for entry in chunk {
            text.push_str("    <objects>\n");
            for (column, value) in self.fields_of(entry) {
                text.push_str(&format!(
                    "        <object name=\"{}\">\n            <value>{}</value>\n        </object>\n",
                    escape(column),
                    escape(value.as_str())
                ));
            }
            text.push_str("    </objects>\n");
        }
        text.push_str("</root>\n");
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let config = FixtureConfig {
            seed: 42,
            ..FixtureConfig::default()
        };
        let a = generate(&config);
        let b = generate(&config);

        assert_eq!(a.entries, b.entries);
        assert_eq!(a.shuffled, b.shuffled);
    }

    #[test]
    fn test_split_duplicates_sum_to_table() {
        let set = generate(&FixtureConfig {
            seed: 3,
            extra_rows: 8,
            ..FixtureConfig::default()
        });

        assert_eq!(set.entries.len(), set.table.len() + 8);
        for (key, totals) in &set.table {
            let mut sum = vec![0i64; totals.len()];
            for entry in set.entries.iter().filter(|e| &e.key == key) {
                for (acc, v) in sum.iter_mut().zip(&entry.values) {
                    *acc += v;
                }
            }
            assert_eq!(&sum, totals);
        }
    }

    #[test]
    fn test_chunks_cover_all_entries() {
        let set = generate(&FixtureConfig::default());
        let dealt: usize = (0..SOURCE_FILES.len()).map(|i| set.chunk(i).len()).sum();
        assert_eq!(dealt, set.entries.len());
    }

    #[test]
    fn test_columns_and_header() {
        let set = generate(&FixtureConfig {
            columns: 2,
            ..FixtureConfig::default()
        });
        assert_eq!(set.columns(), vec!["D1", "D2", "M1", "M2"]);
        assert!(set.basic_text().starts_with("D1\tD2\tM1\tM2\n"));
    }

    #[test]
    fn test_write_to_creates_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let written = generate(&FixtureConfig::default())
            .write_to(dir.path())
            .unwrap();

        assert_eq!(written.len(), SOURCE_FILES.len() + 2);
        for path in written {
            assert!(path.exists(), "missing {}", path.display());
        }
    }
}
