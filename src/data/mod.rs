//! Data layer: core types, loading, and partitioning.
//!
//! Architecture:
//! ```text
//!  .tsv file
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → TimingTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ TimingTable │  header + rows, unique-value index
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ partition │  apply GroupSpec predicates → ordered partitions
//!   └───────────┘
//! ```
use std::path::PathBuf;

use thiserror::Error;

pub mod loader;
pub mod model;
pub mod partition;

/// Errors of the data layer. All are fatal to the operation that raised them;
/// the UI surfaces them as a status message instead of aborting the process.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed table: {0}")]
    Parse(#[from] csv::Error),

    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column '{0}' not found in table")]
    ColumnNotFound(String),
}
