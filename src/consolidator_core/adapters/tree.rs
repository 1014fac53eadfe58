//! XML adapter
//!
//! Layout: one root element; each child of the root is a row group; each child
//! of a row group is a field element carrying a `name` attribute and a nested
//! `<value>` element with the field text.

use super::FormatAdapter;
use crate::consolidator_core::error::SourceReadError;
use crate::consolidator_core::normalizer::{RawField, RawRow};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const ROW_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;
const VALUE_DEPTH: usize = 4;

pub struct TreeAdapter;

fn tree_error(err: impl std::fmt::Display) -> SourceReadError {
    SourceReadError::Tree(err.to_string())
}

struct PendingField {
    name: String,
    value: Option<String>,
}

impl PendingField {
    fn open(element: &BytesStart<'_>) -> Result<Self, SourceReadError> {
        let attr = element.try_get_attribute("name").map_err(tree_error)?.ok_or_else(|| {
            SourceReadError::Malformed(format!(
                "field element <{}> has no name attribute",
                String::from_utf8_lossy(element.name().as_ref())
            ))
        })?;
        let name = attr.unescape_value().map_err(tree_error)?.into_owned();
        Ok(Self { name, value: None })
    }

    fn push_text(&mut self, text: &str) {
        self.value.get_or_insert_with(String::new).push_str(text);
    }

    fn finish(self) -> RawField {
        RawField {
            name: self.name,
            value: self.value,
        }
    }
}

impl TreeAdapter {
    fn parse(&self, path: &Path, first_row_only: bool) -> Result<Vec<RawRow>, SourceReadError> {
        let file = File::open(path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut rows = Vec::new();
        let mut row: RawRow = Vec::new();
        let mut field: Option<PendingField> = None;
        let mut depth = 0usize;
        let mut in_value = false;

        loop {
            match reader.read_event_into(&mut buf).map_err(tree_error)? {
                Event::Start(e) => {
                    depth += 1;
                    match depth {
                        ROW_DEPTH => row.clear(),
                        FIELD_DEPTH => field = Some(PendingField::open(&e)?),
                        VALUE_DEPTH => {
                            // only the first <value> child counts
                            in_value = e.name().as_ref() == b"value"
                                && field.as_ref().map_or(false, |f| f.value.is_none());
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => match depth + 1 {
                    ROW_DEPTH => {
                        rows.push(Vec::new());
                        if first_row_only {
                            return Ok(rows);
                        }
                    }
                    FIELD_DEPTH => row.push(PendingField::open(&e)?.finish()),
                    _ => {}
                },
                Event::Text(t) => {
                    if in_value {
                        let text = t.unescape().map_err(tree_error)?;
                        if let Some(f) = field.as_mut() {
                            f.push_text(&text);
                        }
                    }
                }
                Event::CData(t) => {
                    if in_value {
                        if let Some(f) = field.as_mut() {
                            f.push_text(&String::from_utf8_lossy(&t.into_inner()));
                        }
                    }
                }
                Event::End(_) => {
                    match depth {
                        VALUE_DEPTH => in_value = false,
                        FIELD_DEPTH => {
                            if let Some(f) = field.take() {
                                row.push(f.finish());
                            }
                        }
                        ROW_DEPTH => {
                            rows.push(std::mem::take(&mut row));
                            if first_row_only {
                                return Ok(rows);
                            }
                        }
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if depth != 0 {
            return Err(SourceReadError::Malformed(format!(
                "{} ends inside an open element",
                path.display()
            )));
        }

        Ok(rows)
    }
}

impl FormatAdapter for TreeAdapter {
    fn read_columns(&self, path: &Path) -> Result<Vec<String>, SourceReadError> {
        let rows = self.parse(path, true)?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| row.into_iter().map(|f| f.name).collect())
            .unwrap_or_default())
    }

    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>, SourceReadError> {
        let rows = self.parse(path, false)?;
        log::debug!("Read {} row groups from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn format_name(&self) -> &'static str {
        "XML"
    }
}
