//! Column schema resolution and role classification
//!
//! The schema is read once from a reference source (column names only) and
//! every column is tagged with its role at that point. Nothing downstream
//! inspects name prefixes again.

use super::adapters::AdapterRegistry;
use super::error::SchemaError;
use super::format::format_of;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Role of a column, derived from its name prefix at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnRole {
    /// Grouping dimension, compared as an opaque token
    Key,
    /// Integer measure, summed on merge
    Value,
    /// Matches neither prefix: rendered in the header only
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub role: ColumnRole,
}

/// Name prefixes that select the key and value roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePrefixes {
    pub key: String,
    pub value: String,
}

impl Default for RolePrefixes {
    fn default() -> Self {
        Self {
            key: "D".to_string(),
            value: "M".to_string(),
        }
    }
}

impl RolePrefixes {
    pub fn classify(&self, name: &str) -> ColumnRole {
        if name.starts_with(self.key.as_str()) {
            ColumnRole::Key
        } else if name.starts_with(self.value.as_str()) {
            ColumnRole::Value
        } else {
            ColumnRole::Passthrough
        }
    }
}

/// Ordered, immutable column schema.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    columns: Vec<Column>,
    positions: HashMap<String, usize>,
    key_columns: Vec<String>,
    value_columns: Vec<String>,
}

impl ColumnSchema {
    /// Build a schema from names in resolution order.
    ///
    /// A repeated name keeps its first position.
    pub fn from_names<I, S>(names: I, prefixes: &RolePrefixes) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns = Vec::new();
        let mut positions = HashMap::new();

        for name in names {
            let name = name.into();
            if positions.contains_key(&name) {
                log::warn!("Duplicate column '{}' in reference source, keeping first", name);
                continue;
            }
            positions.insert(name.clone(), columns.len());
            let role = prefixes.classify(&name);
            columns.push(Column { name, role });
        }

        let names_with = |role: ColumnRole| -> Vec<String> {
            columns
                .iter()
                .filter(|c| c.role == role)
                .map(|c| c.name.clone())
                .collect()
        };
        let key_columns = names_with(ColumnRole::Key);
        let value_columns = names_with(ColumnRole::Value);

        Self {
            columns,
            positions,
            key_columns,
            value_columns,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All column names in resolution order (the report header).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn value_columns(&self) -> &[String] {
        &self.value_columns
    }

    /// Role of `name`, or `None` when the column is not part of the schema.
    pub fn role_of(&self, name: &str) -> Option<ColumnRole> {
        self.positions.get(name).map(|&i| self.columns[i].role)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Read the column names of `reference` and classify them.
pub fn resolve(
    reference: &Path,
    registry: &AdapterRegistry,
    prefixes: &RolePrefixes,
) -> Result<ColumnSchema, SchemaError> {
    let tag = format_of(reference).ok_or_else(|| SchemaError::Unsupported {
        source: reference.to_path_buf(),
        reason: "unrecognized file extension".to_string(),
    })?;

    let adapter = registry.adapter_for(tag).ok_or_else(|| SchemaError::Unsupported {
        source: reference.to_path_buf(),
        reason: format!("format {} is not supported yet", tag.as_str()),
    })?;

    let names = adapter
        .read_columns(reference)
        .map_err(|error| SchemaError::Unreadable {
            source: reference.to_path_buf(),
            error,
        })?;

    let schema = ColumnSchema::from_names(names, prefixes);
    if schema.is_empty() {
        return Err(SchemaError::Empty {
            source: reference.to_path_buf(),
        });
    }

    log::info!(
        "📐 Resolved {} columns from {} ({} key, {} value)",
        schema.len(),
        reference.display(),
        schema.key_columns().len(),
        schema.value_columns().len()
    );

    Ok(schema)
}
