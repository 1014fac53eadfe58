//! Aggregation engine: ordered dataset and deduplicated table
//!
//! Both stages are pure: records in, dataset out; dataset in, table out.
//!
//! The ordered dataset is sorted by the first key component only, with a
//! stable sort, so entries sharing that component stay in load order. The
//! deduplicated table iterates in first-seen order of that sorted sequence.

use super::normalizer::RawRecord;
use super::schema::ColumnSchema;
use indexmap::IndexMap;

pub type KeyTuple = Vec<String>;
pub type ValueTuple = Vec<i64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: KeyTuple,
    pub values: ValueTuple,
}

impl Entry {
    /// Split a record into key and value tuples in schema order.
    ///
    /// Returns `None` when a key field is absent. An absent value field
    /// counts as zero.
    pub fn extract(record: &RawRecord, schema: &ColumnSchema) -> Option<Self> {
        let key = schema
            .key_columns()
            .iter()
            .map(|column| record.token(column))
            .collect::<Option<KeyTuple>>()?;

        let values = schema
            .value_columns()
            .iter()
            .map(|column| record.integer(column).unwrap_or(0))
            .collect();

        Some(Self { key, values })
    }

    fn sort_token(&self) -> Option<&String> {
        self.key.first()
    }
}

/// All entries, duplicates kept, shallow-sorted by the first key component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedDataset {
    entries: Vec<Entry>,
}

impl OrderedDataset {
    /// Build from entries already in load order.
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        // sort_by is stable
        entries.sort_by(|a, b| a.sort_token().cmp(&b.sort_token()));
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One value tuple per distinct key, duplicates summed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeduplicatedTable {
    rows: IndexMap<KeyTuple, ValueTuple>,
}

impl DeduplicatedTable {
    pub fn get(&self, key: &[String]) -> Option<&ValueTuple> {
        self.rows.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyTuple, &ValueTuple)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The table as a dataset, one entry per key, in table order.
    pub fn to_dataset(&self) -> OrderedDataset {
        OrderedDataset {
            entries: self
                .rows
                .iter()
                .map(|(key, values)| Entry {
                    key: key.clone(),
                    values: values.clone(),
                })
                .collect(),
        }
    }
}

/// Element-wise sum of two value tuples of the schema's fixed length.
pub fn merge_values(stored: &[i64], incoming: &[i64]) -> ValueTuple {
    debug_assert_eq!(stored.len(), incoming.len(), "value tuples differ in length");
    stored
        .iter()
        .zip(incoming)
        .map(|(a, b)| a.saturating_add(*b))
        .collect()
}

pub fn build_ordered_dataset(records: &[RawRecord], schema: &ColumnSchema) -> OrderedDataset {
    let mut skipped = 0usize;
    let entries: Vec<Entry> = records
        .iter()
        .filter_map(|record| {
            let entry = Entry::extract(record, schema);
            if entry.is_none() {
                skipped += 1;
            }
            entry
        })
        .collect();

    if skipped > 0 {
        log::debug!("Skipped {} records without a full key", skipped);
    }

    OrderedDataset::from_entries(entries)
}

pub fn build_deduplicated_table(dataset: &OrderedDataset) -> DeduplicatedTable {
    let mut rows: IndexMap<KeyTuple, ValueTuple> = IndexMap::new();

    for entry in dataset.entries() {
        match rows.get_mut(&entry.key) {
            Some(stored) => *stored = merge_values(stored, &entry.values),
            None => {
                rows.insert(entry.key.clone(), entry.values.clone());
            }
        }
    }

    DeduplicatedTable { rows }
}
