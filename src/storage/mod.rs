//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - location(country_code, postal_code, place/state/county/community names and codes,
//!   latitude, longitude, accuracy)
//!
//! The table is created by the first ingest, which also creates the
//! `idx_postalcode_countrycode` index. Its presence is the only marker of an
//! initialized database.

pub mod schema;
pub mod sqlite;

pub use sqlite::{LocationStore, StoreStats};
