//! Integration tests for the consolidation pipeline
//!
//! Runs the full schema → load → aggregate → report flow on generated and
//! hand-written source files in a temp directory.
//!
//! Key integration points tested:
//! - Generated fixtures reproduce the expected reports
//! - Placeholder and unreadable sources do not stop the run
//! - Invalid value fields drop only the field
//! - A produced report reads back as TSV input

#[cfg(test)]
mod pipeline_integration_tests {
    use std::collections::HashMap;
    use std::path::Path;
    use tallyflow::consolidator_core::{
        load_all, resolve, AdapterRegistry, Diagnostic, FormatTag, RolePrefixes, SourceOutcome,
    };
    use tallyflow::fixtures::{generate, FixtureConfig, ADVANCED_EXPECTED, BASIC_EXPECTED, SOURCE_FILES};
    use tallyflow::pipeline::{run, PipelineConfig};

    fn config_in(dir: &Path, sources: &[&str], reference: &str) -> PipelineConfig {
        PipelineConfig {
            sources: sources.iter().map(|s| dir.join(s)).collect(),
            reference: dir.join(reference),
            basic_output: dir.join("basic_results.tsv"),
            advanced_output: dir.join("advanced_results.tsv"),
            ..PipelineConfig::default()
        }
    }

    /// Header plus body lines counted as a multiset (tie order may differ).
    fn lines_of(text: &str) -> (String, HashMap<String, usize>) {
        let mut lines = text.split('\n');
        let header = lines.next().unwrap_or_default().to_string();
        let mut body = HashMap::new();
        for line in lines.filter(|l| !l.is_empty()) {
            *body.entry(line.to_string()).or_insert(0) += 1;
        }
        (header, body)
    }

    fn first_components(text: &str) -> Vec<String> {
        text.split('\n')
            .skip(1)
            .filter(|l| !l.is_empty())
            .map(|l| l.split('\t').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_generated_fixtures_match_expected_reports() {
        for seed in [1u64, 2, 3, 17] {
            let dir = tempfile::tempdir().unwrap();
            let set = generate(&FixtureConfig {
                seed,
                ..FixtureConfig::default()
            });
            set.write_to(dir.path()).unwrap();

            let config = config_in(dir.path(), &SOURCE_FILES, "xml_data.xml");
            let summary = run(&config).unwrap();

            assert!(summary.diagnostics.is_empty(), "seed {}: {:?}", seed, summary.diagnostics);
            assert_eq!(summary.ordered_entries, set.entries.len());
            assert_eq!(summary.distinct_keys, set.table.len());

            let basic = std::fs::read_to_string(&config.basic_output).unwrap();
            let expected_basic = std::fs::read_to_string(dir.path().join(BASIC_EXPECTED)).unwrap();
            assert_eq!(lines_of(&basic), lines_of(&expected_basic), "seed {}", seed);

            let advanced = std::fs::read_to_string(&config.advanced_output).unwrap();
            let expected_advanced =
                std::fs::read_to_string(dir.path().join(ADVANCED_EXPECTED)).unwrap();
            assert_eq!(lines_of(&advanced), lines_of(&expected_advanced), "seed {}", seed);

            let firsts = first_components(&basic);
            assert!(firsts.windows(2).all(|w| w[0] <= w[1]), "seed {}", seed);
        }
    }

    #[test]
    fn test_placeholder_source_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "D1,D2,M1\na,x,3\nb,y,5\n").unwrap();
        std::fs::write(dir.path().join("b.yaml"), "fields:\n  - D1: z\n").unwrap();

        let config = config_in(dir.path(), &["a.csv", "b.yaml"], "a.csv");
        let summary = run(&config).unwrap();

        assert_eq!(summary.ordered_entries, 2);
        assert_eq!(summary.diagnostics.len(), 1);
        assert!(matches!(
            &summary.diagnostics[0],
            Diagnostic::UnsupportedFormat { format: FormatTag::Yaml, .. }
        ));
        assert_eq!(summary.sources[1].outcome, SourceOutcome::Unsupported);
        assert!(config.basic_output.exists());
        assert!(config.advanced_output.exists());
    }

    #[test]
    fn test_invalid_value_keeps_record() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.csv"),
            "D1,D2,M1,M2\na,x,abc,2\na,x,1,1\n",
        )
        .unwrap();

        let config = config_in(dir.path(), &["a.csv"], "a.csv");
        let summary = run(&config).unwrap();

        assert_eq!(summary.ordered_entries, 2);
        assert_eq!(
            summary.diagnostics,
            vec![Diagnostic::FieldCoercion {
                source: dir.path().join("a.csv"),
                column: "M1".to_string(),
                value: "abc".to_string(),
            }]
        );
        assert_eq!(
            std::fs::read_to_string(&config.advanced_output).unwrap(),
            "D1\tD2\tM1\tM2\na\tx\t1\t3"
        );
    }

    #[test]
    fn test_mixed_formats_with_reordered_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ref.xml"),
            r#"<root>
    <objects>
        <object name="D1"><value>b</value></object>
        <object name="M1"><value>1</value></object>
        <object name="extra"><value>ignored</value></object>
    </objects>
</root>"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("more.json"),
            r#"{"fields": [{"M1": "2", "D1": "a", "Z": 1}, {"M1": 4, "D1": "b"}]}"#,
        )
        .unwrap();

        let config = config_in(dir.path(), &["ref.xml", "more.json"], "ref.xml");
        run(&config).unwrap();

        // "extra" is in the header but matches neither role
        assert_eq!(
            std::fs::read_to_string(&config.basic_output).unwrap(),
            "D1\tM1\textra\na\t2\nb\t1\nb\t4"
        );
        assert_eq!(
            std::fs::read_to_string(&config.advanced_output).unwrap(),
            "D1\tM1\textra\na\t2\nb\t5"
        );
    }

    #[test]
    fn test_report_reads_back_as_tsv_input() {
        let dir = tempfile::tempdir().unwrap();
        let set = generate(&FixtureConfig {
            seed: 99,
            ..FixtureConfig::default()
        });
        set.write_to(dir.path()).unwrap();

        let config = config_in(dir.path(), &SOURCE_FILES, "csv_data_1.csv");
        run(&config).unwrap();

        let registry = AdapterRegistry::new();
        let schema = resolve(&config.basic_output, &registry, &RolePrefixes::default()).unwrap();
        let reloaded = load_all(&[&config.basic_output], &schema, &registry);
        assert!(reloaded.diagnostics.is_empty());

        let again = config_in(dir.path(), &["basic_results.tsv"], "basic_results.tsv");
        let again = PipelineConfig {
            basic_output: dir.path().join("basic_again.tsv"),
            advanced_output: dir.path().join("advanced_again.tsv"),
            ..again
        };
        run(&again).unwrap();

        let first = std::fs::read_to_string(&config.basic_output).unwrap();
        let second = std::fs::read_to_string(&again.basic_output).unwrap();
        assert_eq!(first, second);
        assert_eq!(reloaded.records.len(), set.entries.len());

        let advanced = std::fs::read_to_string(&config.advanced_output).unwrap();
        let advanced_again = std::fs::read_to_string(&again.advanced_output).unwrap();
        assert_eq!(advanced, advanced_again);
    }

    #[test]
    fn test_missing_reference_aborts_before_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "D1,M1\na,1\n").unwrap();

        let config = config_in(dir.path(), &["a.csv"], "xml_data.xml");
        assert!(run(&config).is_err());
        assert!(!config.basic_output.exists());
    }
}
