//! Error types for catalog loading and search.
//!
//! `CatalogError` covers everything that can go wrong before an index exists
//! (reading the source, validating rows, fitting the vocabulary). It is fatal
//! at startup. `SearchError` is the caller-side failure of a lookup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog is empty: no records to index")]
    Empty,

    #[error("Record {row} has no title")]
    MissingTitle { row: usize },

    #[error("No indexable terms in any title (vocabulary is empty)")]
    EmptyVocabulary,

    #[error("Source '{path}' has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid table name '{name}'")]
    InvalidTable { name: String },

    #[error("Unsupported catalog format: '{path}' (expected .csv, .db, .sqlite or .sqlite3)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("SQLite error reading '{path}': {source}")]
    Sqlite {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("No query given")]
    EmptyQuery,
}
