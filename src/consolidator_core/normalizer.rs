//! Record normalization from adapter rows to schema-aligned records

use super::diagnostic::Diagnostic;
use super::schema::{ColumnRole, ColumnSchema};
use std::collections::HashMap;
use std::path::Path;

/// One named field as it appears in a source, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub name: String,
    /// `None` when the source carries the name but no value
    pub value: Option<String>,
}

impl RawField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn without_value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// Fields of one source row/object, in source order.
pub type RawRow = Vec<RawField>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Token(String),
    Integer(i64),
}

/// Schema-aligned record: only schema columns, value columns already integers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, FieldValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: FieldValue) {
        self.fields.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Field rendered as a comparison token.
    pub fn token(&self, column: &str) -> Option<String> {
        match self.fields.get(column)? {
            FieldValue::Token(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
        }
    }

    pub fn integer(&self, column: &str) -> Option<i64> {
        match self.fields.get(column)? {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Token(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse a value-column field as a base-10 integer.
pub fn coerce_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Filter `row` against `schema` and coerce value columns.
///
/// Unknown columns are dropped silently. A value that fails coercion drops
/// only that field. A row missing any key column yields no record.
pub fn normalize_row(
    source: &Path,
    row: RawRow,
    schema: &ColumnSchema,
) -> (Option<RawRecord>, Vec<Diagnostic>) {
    let mut record = RawRecord::new();
    let mut diagnostics = Vec::new();

    for field in row {
        let Some(role) = schema.role_of(&field.name) else {
            continue;
        };

        let Some(value) = field.value else {
            diagnostics.push(
                Diagnostic::MissingFieldValue {
                    source: source.to_path_buf(),
                    column: field.name,
                }
                .emit(),
            );
            continue;
        };

        match role {
            ColumnRole::Value => match coerce_integer(&value) {
                Some(n) => record.insert(field.name, FieldValue::Integer(n)),
                None => diagnostics.push(
                    Diagnostic::FieldCoercion {
                        source: source.to_path_buf(),
                        column: field.name,
                        value,
                    }
                    .emit(),
                ),
            },
            ColumnRole::Key | ColumnRole::Passthrough => {
                record.insert(field.name, FieldValue::Token(value))
            }
        }
    }

    if let Some(missing) = schema
        .key_columns()
        .iter()
        .find(|column| record.get(column).is_none())
    {
        diagnostics.push(
            Diagnostic::MissingKeyField {
                source: source.to_path_buf(),
                column: missing.clone(),
            }
            .emit(),
        );
        return (None, diagnostics);
    }

    (Some(record), diagnostics)
}
