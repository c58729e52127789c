//! # locdb - Postal code coordinate store
//!
//! Loads postal-code reference data into a local SQLite database and answers
//! point lookups: country code + postal code -> latitude, longitude, accuracy.
//!
//! locdb provides:
//! - A `location` table bootstrapped lazily on the first ingest
//! - Per-country replace-and-reload of reference data in one transaction
//! - Exact (country_code, postal_code) coordinate lookups
//! - Per-country row counts

pub mod location;
pub mod storage;
pub mod import;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use location::{Coordinates, LocationRecord};
pub use storage::{LocationStore, StoreStats};

use std::path::PathBuf;

/// Result type alias for locdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for locdb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Schema mismatch: location table is missing columns {missing:?}")]
    SchemaMismatch { missing: Vec<String> },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No records for {country_code} in {path}")]
    NoRecords { country_code: String, path: PathBuf },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),
}
