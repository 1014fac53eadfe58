//! Consolidator Core - Schema-Driven Record Normalization and Aggregation
//!
//! Merges records from heterogeneous source files that share one logical
//! schema into two tab-separated reports.
//!
//! # Architecture
//!
//! ```text
//! Reference source → resolve() → ColumnSchema (name + role per column)
//!     ↓
//! Sources → AdapterRegistry (CSV / TSV / XML / JSON) → normalize_row → RawRecord
//!     ↓
//! build_ordered_dataset (stable sort on first key component)
//!     ↓
//! build_deduplicated_table (element-wise sum per key)
//!     ↓
//! render_ordered / render_deduplicated → persist
//! ```

pub mod adapters;
pub mod aggregation;
pub mod diagnostic;
pub mod error;
pub mod format;
pub mod loader;
pub mod normalizer;
pub mod schema;
pub mod tsv_writer;

pub use adapters::{AdapterRegistry, FormatAdapter};
pub use aggregation::{
    build_deduplicated_table, build_ordered_dataset, DeduplicatedTable, Entry, OrderedDataset,
};
pub use diagnostic::Diagnostic;
pub use error::{ReportError, SchemaError, SourceReadError};
pub use format::{format_of, FormatTag};
pub use loader::{load_all, LoadReport, SourceOutcome, SourceReport};
pub use normalizer::{FieldValue, RawField, RawRecord};
pub use schema::{resolve, Column, ColumnRole, ColumnSchema, RolePrefixes};
pub use tsv_writer::{persist, render_deduplicated, render_ordered, ReportKind};
