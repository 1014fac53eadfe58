//! Source format tags, resolved from file extensions

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormatTag {
    /// Comma separated rows, first row is the header
    Csv,
    /// Tab separated rows, first row is the header
    Tsv,
    /// `<root><objects><object name=".."><value>..</value></object>..</objects>..</root>`
    Xml,
    /// `{"fields": [{..}, ..]}`
    Json,
    /// Recognized, no adapter yet
    Yaml,
}

impl FormatTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Csv => "csv",
            FormatTag::Tsv => "tsv",
            FormatTag::Xml => "xml",
            FormatTag::Json => "json",
            FormatTag::Yaml => "yaml",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(FormatTag::Csv),
            "tsv" => Some(FormatTag::Tsv),
            "xml" => Some(FormatTag::Xml),
            "json" => Some(FormatTag::Json),
            "yaml" => Some(FormatTag::Yaml),
            _ => None,
        }
    }

    pub fn all() -> [FormatTag; 5] {
        [
            FormatTag::Csv,
            FormatTag::Tsv,
            FormatTag::Xml,
            FormatTag::Json,
            FormatTag::Yaml,
        ]
    }
}

/// Format of a source path, or `None` for an unrecognized extension.
pub fn format_of(path: &Path) -> Option<FormatTag> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(FormatTag::from_extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_of_known_extensions() {
        assert_eq!(format_of(Path::new("csv_data_1.csv")), Some(FormatTag::Csv));
        assert_eq!(format_of(Path::new("dir/xml_data.XML")), Some(FormatTag::Xml));
        assert_eq!(format_of(Path::new("json_data.json")), Some(FormatTag::Json));
        assert_eq!(format_of(Path::new("basic_results.tsv")), Some(FormatTag::Tsv));
        assert_eq!(format_of(Path::new("data.yaml")), Some(FormatTag::Yaml));
    }

    #[test]
    fn test_format_of_unknown_extension() {
        assert_eq!(format_of(Path::new("data.parquet")), None);
        assert_eq!(format_of(Path::new("no_extension")), None);
    }

    #[test]
    fn test_round_trip_names() {
        for tag in FormatTag::all() {
            assert_eq!(FormatTag::from_extension(tag.as_str()), Some(tag));
        }
    }
}
