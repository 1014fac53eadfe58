//! Record loader: runs every configured source through its adapter
//!
//! Sources are read one after another. A source that cannot be used is
//! skipped with a diagnostic; it never aborts the others.

use super::adapters::AdapterRegistry;
use super::diagnostic::Diagnostic;
use super::format::format_of;
use super::normalizer::RawRecord;
use super::schema::ColumnSchema;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SourceOutcome {
    Loaded { records: usize },
    /// Recognized extension without an adapter
    Unsupported,
    Unrecognized,
    /// Recognized format, unreadable content
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: PathBuf,
    pub outcome: SourceOutcome,
}

/// All records in load order, plus what happened to each source.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<RawRecord>,
    pub sources: Vec<SourceReport>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    fn skip(&mut self, source: &Path, outcome: SourceOutcome, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic.emit());
        self.sources.push(SourceReport {
            source: source.to_path_buf(),
            outcome,
        });
    }
}

pub fn load_all<P: AsRef<Path>>(
    sources: &[P],
    schema: &ColumnSchema,
    registry: &AdapterRegistry,
) -> LoadReport {
    let mut report = LoadReport::default();

    for source in sources {
        let source = source.as_ref();

        let Some(tag) = format_of(source) else {
            report.skip(
                source,
                SourceOutcome::Unrecognized,
                Diagnostic::UnrecognizedFormat {
                    source: source.to_path_buf(),
                },
            );
            continue;
        };

        let Some(adapter) = registry.adapter_for(tag) else {
            report.skip(
                source,
                SourceOutcome::Unsupported,
                Diagnostic::UnsupportedFormat {
                    source: source.to_path_buf(),
                    format: tag,
                },
            );
            continue;
        };

        match adapter.read_records(source, schema) {
            Ok(adapted) => {
                log::info!(
                    "📖 Loaded {} records from {} ({})",
                    adapted.records.len(),
                    source.display(),
                    adapter.format_name()
                );
                report.sources.push(SourceReport {
                    source: source.to_path_buf(),
                    outcome: SourceOutcome::Loaded {
                        records: adapted.records.len(),
                    },
                });
                report.records.extend(adapted.records);
                report.diagnostics.extend(adapted.diagnostics);
            }
            Err(e) => report.skip(
                source,
                SourceOutcome::Failed,
                Diagnostic::SourceRead {
                    source: source.to_path_buf(),
                    reason: e.to_string(),
                },
            ),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidator_core::schema::RolePrefixes;

    fn schema() -> ColumnSchema {
        ColumnSchema::from_names(["D1", "M1"], &RolePrefixes::default())
    }

    #[test]
    fn test_loads_and_concatenates_sources() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("a.csv");
        let json = dir.path().join("b.json");
        std::fs::write(&csv, "D1,M1\na,1\nb,2\n").unwrap();
        std::fs::write(&json, r#"{"fields": [{"D1": "c", "M1": 3}]}"#).unwrap();

        let report = load_all(&[csv, json], &schema(), &AdapterRegistry::new());

        assert_eq!(report.records.len(), 3);
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.sources[1].outcome, SourceOutcome::Loaded { records: 1 });
    }

    #[test]
    fn test_placeholder_format_is_skipped_with_one_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("a.csv");
        std::fs::write(&csv, "D1,M1\na,1\n").unwrap();
        let yaml = dir.path().join("b.yaml");

        let report = load_all(&[yaml.clone(), csv], &schema(), &AdapterRegistry::new());

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.sources[0].outcome, SourceOutcome::Unsupported);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::UnsupportedFormat {
                source: yaml,
                format: crate::consolidator_core::format::FormatTag::Yaml,
            }]
        );
    }

    #[test]
    fn test_unrecognized_and_unreadable_sources_do_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let csv = dir.path().join("ok.csv");
        std::fs::write(&csv, "D1,M1\na,1\n").unwrap();

        let sources = vec![dir.path().join("data.parquet"), broken, csv];
        let report = load_all(&sources, &schema(), &AdapterRegistry::new());

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.sources[0].outcome, SourceOutcome::Unrecognized);
        assert_eq!(report.sources[1].outcome, SourceOutcome::Failed);
    }
}
