//! SQLite storage implementation

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info, Span};

use super::schema;
use crate::location::{Coordinates, LocationRecord};
use crate::{Error, Result};

/// Path reported for in-memory stores
const MEMORY_PATH: &str = ":memory:";

/// Connection lifecycle of a store
enum State {
    Disconnected,
    Connected { conn: Connection, path: PathBuf },
}

impl State {
    fn connection(&self) -> Result<&Connection> {
        match self {
            State::Connected { conn, .. } => Ok(conn),
            State::Disconnected => Err(not_connected()),
        }
    }

    fn connection_mut(&mut self) -> Result<&mut Connection> {
        match self {
            State::Connected { conn, .. } => Ok(conn),
            State::Disconnected => Err(not_connected()),
        }
    }
}

fn not_connected() -> Error {
    Error::InvalidState("location store is not connected".to_string())
}

/// SQLite-backed store of postal code locations.
///
/// A store starts out disconnected. `connect` opens (and creates if needed)
/// the database file, `close` releases it; every other operation fails with
/// [`Error::InvalidState`] while disconnected. Dropping a connected store
/// closes its connection.
///
/// All logging happens inside the span handed to [`LocationStore::with_span`],
/// so callers decide where the store's events end up.
pub struct LocationStore {
    state: State,
    span: Span,
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationStore {
    /// Create a disconnected store
    pub fn new() -> Self {
        Self::with_span(tracing::debug_span!("location_store"))
    }

    /// Create a disconnected store that logs within `span`
    pub fn with_span(span: Span) -> Self {
        Self {
            state: State::Disconnected,
            span,
        }
    }

    /// Create a store and connect it to a database file (creates if doesn't exist)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.connect(path)?;
        Ok(store)
    }

    /// Create a store connected to a fresh in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let mut store = Self::new();
        store.connect_in_memory()?;
        Ok(store)
    }

    // ========== Lifecycle ==========

    /// Connect to the database at `path`, creating the file if it doesn't exist.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub fn connect(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let _enter = self.span.enter();
        let path = path.as_ref();
        self.ensure_disconnected()?;

        debug!(path = %path.display(), "connecting to location database");
        let conn = Connection::open(path).map_err(|source| Error::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::check_readable(&conn, path)?;

        self.state = State::Connected {
            conn,
            path: path.to_path_buf(),
        };
        Ok(())
    }

    /// Connect to a fresh in-memory database
    pub fn connect_in_memory(&mut self) -> Result<()> {
        let _enter = self.span.enter();
        self.ensure_disconnected()?;

        debug!("connecting to in-memory location database");
        let conn = Connection::open_in_memory().map_err(|source| Error::StorageUnavailable {
            path: PathBuf::from(MEMORY_PATH),
            source,
        })?;

        self.state = State::Connected {
            conn,
            path: PathBuf::from(MEMORY_PATH),
        };
        Ok(())
    }

    /// Close the connection. The store can not be used afterwards until it is reconnected.
    pub fn close(&mut self) -> Result<()> {
        let _enter = self.span.enter();
        match std::mem::replace(&mut self.state, State::Disconnected) {
            State::Connected { conn, path } => {
                if let Err((conn, err)) = conn.close() {
                    self.state = State::Connected { conn, path };
                    return Err(err.into());
                }
                debug!(path = %path.display(), "closed location database");
                Ok(())
            }
            State::Disconnected => Err(not_connected()),
        }
    }

    /// Whether the store currently holds a connection
    pub fn is_connected(&self) -> bool {
        matches!(self.state, State::Connected { .. })
    }

    /// Path of the connected database, if any
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            State::Connected { path, .. } => Some(path),
            State::Disconnected => None,
        }
    }

    fn ensure_disconnected(&self) -> Result<()> {
        match &self.state {
            State::Connected { path, .. } => Err(Error::InvalidState(format!(
                "location store is already connected to {}",
                path.display()
            ))),
            State::Disconnected => Ok(()),
        }
    }

    /// SQLite defers some failures (non-database files, locked files) to the first read
    fn check_readable(conn: &Connection, path: &Path) -> Result<()> {
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map(|_| ())
            .map_err(|source| Error::StorageUnavailable {
                path: path.to_path_buf(),
                source,
            })
    }

    // ========== Schema ==========

    /// Check if the location table exists
    pub fn table_exists(&self) -> Result<bool> {
        let _enter = self.span.enter();
        let conn = self.state.connection()?;
        location_table_exists(conn)
    }

    /// Is this the first time the database has been used.
    ///
    /// The database file is created on connect, but the location table only
    /// appears with the first ingest.
    pub fn is_first_use(&self) -> Result<bool> {
        Ok(!self.table_exists()?)
    }

    /// Check if the postal code index exists
    pub fn postal_code_index_exists(&self) -> Result<bool> {
        let _enter = self.span.enter();
        let conn = self.state.connection()?;
        schema_object_exists(conn, "index", schema::POSTAL_CODE_INDEX)
    }

    // ========== Ingest ==========

    /// Add a country's data to the database.
    ///
    /// Unless `erase_first` is false, every existing row for `country_code`
    /// is deleted before `records` are appended. The first ingest creates the
    /// location table and its postal code index. The whole call runs in one
    /// transaction: either all of it is visible afterwards or none of it.
    ///
    /// Returns the number of rows appended.
    pub fn ingest_country_data(
        &mut self,
        records: &[LocationRecord],
        country_code: &str,
        erase_first: bool,
    ) -> Result<usize> {
        let _enter = self.span.enter();
        let conn = self.state.connection_mut()?;

        info!(country_code, rows = records.len(), "importing country data");

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let first_time = !location_table_exists(&tx)?;

        if first_time {
            debug!(country_code, "first use, creating location table");
            tx.execute_batch(schema::CREATE_LOCATION_TABLE)?;
        } else {
            check_location_columns(&tx)?;
            if erase_first {
                let removed = tx.execute(schema::DELETE_COUNTRY, [country_code])?;
                debug!(country_code, removed, "erased previous country data");
            }
        }

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(schema::INSERT_LOCATION)?;
            for record in records {
                stmt.execute(params![
                    record.country_code,
                    record.postal_code,
                    record.place_name,
                    record.state_name,
                    record.state_code,
                    record.county_name,
                    record.county_code,
                    record.community_name,
                    record.community_code,
                    record.latitude,
                    record.longitude,
                    record.accuracy,
                ])?;
                inserted += 1;
            }
        }

        if first_time {
            tx.execute_batch(schema::CREATE_POSTAL_CODE_INDEX)?;
        }

        tx.commit()?;
        debug!(country_code, inserted, "country data committed");
        Ok(inserted)
    }

    // ========== Queries ==========

    /// Number of stored postal codes per country code
    pub fn count_by_country(&self) -> Result<HashMap<String, usize>> {
        let _enter = self.span.enter();
        let conn = self.state.connection()?;
        if !location_table_exists(conn)? {
            return Ok(HashMap::new());
        }

        let mut stmt = conn.prepare(schema::COUNT_BY_COUNTRY)?;
        let counts = stmt
            .query_map([], |row| {
                let country_code: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((country_code, count as usize))
            })?
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;

        Ok(counts)
    }

    /// Find coordinates for a country code and postal code.
    ///
    /// Values are matched exactly. Returns `None` if the postal code is not
    /// found. If the pair was stored more than once, the most recently
    /// inserted row is returned.
    pub fn find_coordinates(
        &self,
        country_code: &str,
        postal_code: &str,
    ) -> Result<Option<Coordinates>> {
        let _enter = self.span.enter();
        let conn = self.state.connection()?;
        if !location_table_exists(conn)? {
            return Ok(None);
        }

        conn.query_row(
            schema::FIND_COORDINATES,
            [country_code, postal_code],
            |row| {
                Ok(Coordinates {
                    country_code: row.get(0)?,
                    postal_code: row.get(1)?,
                    latitude: row.get(2)?,
                    longitude: row.get(3)?,
                    accuracy: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(Into::into)
    }

    /// Count all stored rows
    pub fn count_rows(&self) -> Result<usize> {
        let _enter = self.span.enter();
        let conn = self.state.connection()?;
        if !location_table_exists(conn)? {
            return Ok(0);
        }
        let count: i64 = conn.query_row(schema::COUNT_ALL, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        let path = self.path().map(Path::to_path_buf).ok_or_else(not_connected)?;
        Ok(StoreStats {
            path,
            first_use: self.is_first_use()?,
            indexed: self.postal_code_index_exists()?,
            rows: self.count_rows()?,
            countries: self.count_by_country()?.len(),
        })
    }
}

fn schema_object_exists(conn: &Connection, kind: &str, name: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(schema::SCHEMA_OBJECT_EXISTS, params![kind, name], |row| row.get(0))
        .optional()?;
    Ok(found.is_some())
}

fn location_table_exists(conn: &Connection) -> Result<bool> {
    schema_object_exists(conn, "table", schema::LOCATION_TABLE)
}

/// Extra columns are fine, missing ones are not
fn check_location_columns(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(schema::TABLE_INFO)?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let missing: Vec<String> = schema::LOCATION_COLUMNS
        .iter()
        .filter(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::SchemaMismatch { missing })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub path: PathBuf,
    pub first_use: bool,
    pub indexed: bool,
    pub rows: usize,
    pub countries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, postal: &str, lat: f64, lon: f64, accuracy: i64) -> LocationRecord {
        LocationRecord::new(country, postal, lat, lon, accuracy)
    }

    fn first_batch() -> Vec<LocationRecord> {
        vec![
            record("BA", "BA100", 10.0, 20.0, 1),
            record("BA", "BA200", 11.0, 21.0, 1),
            record("BA", "BA300", 12.0, 22.0, 4),
            record("BA", "BA400", 13.0, 23.0, 4),
        ]
    }

    fn second_batch() -> Vec<LocationRecord> {
        vec![
            record("BA", "BA300", 32.0, 42.0, 1),
            record("BA", "BA500", 33.0, 43.0, 1),
            record("BA", "BA600", 34.0, 44.0, 6),
            record("BA", "BA700", 35.0, 45.0, 6),
        ]
    }

    #[test]
    fn test_connect_and_close() {
        let mut store = LocationStore::new();
        assert!(!store.is_connected());

        store.connect_in_memory().unwrap();
        assert!(store.is_connected());
        assert_eq!(store.path(), Some(Path::new(":memory:")));

        store.close().unwrap();
        assert!(!store.is_connected());
        assert_eq!(store.path(), None);
    }

    #[test]
    fn test_connect_twice_is_invalid_state() {
        let mut store = LocationStore::open_in_memory().unwrap();
        let err = store.connect_in_memory().unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert!(store.is_connected());
    }

    #[test]
    fn test_connect_unopenable_path_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("locations.db");

        let mut store = LocationStore::new();
        let err = store.connect(&path).unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable { .. }));
        assert!(!store.is_connected());
    }

    #[test]
    fn test_connect_non_database_file_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a.db");
        std::fs::write(&path, vec![b'x'; 4096]).unwrap();

        let err = LocationStore::open(&path).err().unwrap();
        assert!(matches!(err, Error::StorageUnavailable { .. }));
    }

    #[test]
    fn test_operations_before_connect_fail() {
        let mut store = LocationStore::new();
        assert!(matches!(store.table_exists(), Err(Error::InvalidState(_))));
        assert!(matches!(store.close(), Err(Error::InvalidState(_))));
        assert!(matches!(
            store.ingest_country_data(&first_batch(), "BA", true),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_operations_after_close_fail() {
        let mut store = LocationStore::open_in_memory().unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();
        store.close().unwrap();

        assert!(matches!(store.table_exists(), Err(Error::InvalidState(_))));
        assert!(matches!(store.is_first_use(), Err(Error::InvalidState(_))));
        assert!(matches!(store.count_by_country(), Err(Error::InvalidState(_))));
        assert!(matches!(
            store.find_coordinates("BA", "BA100"),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            store.ingest_country_data(&second_batch(), "BA", true),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(store.stats(), Err(Error::InvalidState(_))));
        assert!(matches!(store.close(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_table_exists_after_first_ingest() {
        let mut store = LocationStore::open_in_memory().unwrap();
        assert!(!store.table_exists().unwrap());
        assert!(store.is_first_use().unwrap());
        assert!(!store.postal_code_index_exists().unwrap());

        store.ingest_country_data(&first_batch(), "BA", true).unwrap();

        assert!(store.table_exists().unwrap());
        assert!(!store.is_first_use().unwrap());
        assert!(store.postal_code_index_exists().unwrap());
    }

    #[test]
    fn test_empty_first_ingest_bootstraps_schema() {
        let mut store = LocationStore::open_in_memory().unwrap();
        let inserted = store.ingest_country_data(&[], "AA", true).unwrap();

        assert_eq!(inserted, 0);
        assert!(store.table_exists().unwrap());
        assert!(store.postal_code_index_exists().unwrap());
        assert!(store.count_by_country().unwrap().is_empty());
    }

    #[test]
    fn test_queries_on_first_use_store() {
        let store = LocationStore::open_in_memory().unwrap();
        assert!(store.count_by_country().unwrap().is_empty());
        assert_eq!(store.find_coordinates("AA", "AA100").unwrap(), None);
        assert_eq!(store.count_rows().unwrap(), 0);
    }

    #[test]
    fn test_mixed_country_ingest() {
        let mut store = LocationStore::open_in_memory().unwrap();
        assert!(store.is_first_use().unwrap());

        let records = vec![
            record("AA", "AA100", 1.0, 2.0, 1),
            record("AB", "AB100", 51.4954, -0.1474, 6),
            record("AB", "AB200", 52.0, -1.0, 4),
        ];
        let inserted = store.ingest_country_data(&records, "AA", true).unwrap();
        assert_eq!(inserted, 3);

        let counts = store.count_by_country().unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["AA"], 1);
        assert_eq!(counts["AB"], 2);

        let found = store.find_coordinates("AB", "AB100").unwrap().unwrap();
        assert_eq!(found, records[1].coordinates());
    }

    #[test]
    fn test_count_matches_ingested_records() {
        let mut store = LocationStore::open_in_memory().unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();

        assert_eq!(store.count_by_country().unwrap()["BA"], 4);
        assert_eq!(store.count_rows().unwrap(), 4);
    }

    #[test]
    fn test_reload_replaces_country_data() {
        let mut store = LocationStore::open_in_memory().unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();
        store
            .ingest_country_data(&[record("CA", "CA100", 5.0, 6.0, 1)], "CA", true)
            .unwrap();

        store.ingest_country_data(&second_batch(), "BA", true).unwrap();

        let counts = store.count_by_country().unwrap();
        assert_eq!(counts["BA"], 4);
        assert_eq!(counts["CA"], 1);

        // only in the first batch
        assert_eq!(store.find_coordinates("BA", "BA100").unwrap(), None);
        // only in the second batch
        let found = store.find_coordinates("BA", "BA500").unwrap().unwrap();
        assert_eq!(found.latitude, 33.0);
        assert_eq!(found.longitude, 43.0);
        // in both, second values win
        let found = store.find_coordinates("BA", "BA300").unwrap().unwrap();
        assert_eq!(found.latitude, 32.0);
        assert_eq!(found.accuracy, 1);
        // other country untouched
        assert!(store.find_coordinates("CA", "CA100").unwrap().is_some());
    }

    #[test]
    fn test_reload_without_erase_keeps_both_batches() {
        let mut store = LocationStore::open_in_memory().unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();
        store.ingest_country_data(&second_batch(), "BA", false).unwrap();

        assert_eq!(store.count_by_country().unwrap()["BA"], 8);
        assert!(store.find_coordinates("BA", "BA100").unwrap().is_some());
        assert!(store.find_coordinates("BA", "BA700").unwrap().is_some());
    }

    #[test]
    fn test_duplicate_lookup_returns_newest_row() {
        let mut store = LocationStore::open_in_memory().unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();
        store.ingest_country_data(&second_batch(), "BA", false).unwrap();

        // BA300 is stored twice now
        let found = store.find_coordinates("BA", "BA300").unwrap().unwrap();
        assert_eq!(found.latitude, 32.0);
        assert_eq!(found.longitude, 42.0);
    }

    #[test]
    fn test_duplicate_within_batch_returns_later_record() {
        let mut store = LocationStore::open_in_memory().unwrap();
        let batch = vec![
            record("BA", "BA100", 10.0, 20.0, 4),
            record("BA", "BA200", 11.0, 21.0, 4),
            record("BA", "BA100", 15.0, 25.0, 1),
        ];
        store.ingest_country_data(&batch, "BA", true).unwrap();

        assert_eq!(store.count_by_country().unwrap()["BA"], 3);
        let found = store.find_coordinates("BA", "BA100").unwrap().unwrap();
        assert_eq!(found, batch[2].coordinates());
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut store = LocationStore::open_in_memory().unwrap();
        store
            .ingest_country_data(&[record("GB", "SW1W 0NY", 51.4954, -0.1474, 6)], "GB", true)
            .unwrap();

        assert!(store.find_coordinates("GB", "SW1W 0NY").unwrap().is_some());
        assert_eq!(store.find_coordinates("gb", "SW1W 0NY").unwrap(), None);
        assert_eq!(store.find_coordinates("GB", "SW1W0NY").unwrap(), None);
        assert_eq!(store.find_coordinates("GB", " SW1W 0NY").unwrap(), None);
        assert_eq!(store.find_coordinates("FR", "SW1W 0NY").unwrap(), None);
    }

    #[test]
    fn test_failed_ingest_keeps_previous_data() {
        let mut store = LocationStore::open_in_memory().unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();

        // SQLite stores NaN as NULL, which the NOT NULL latitude rejects
        let broken = vec![
            record("BA", "BA900", 1.0, 1.0, 1),
            record("BA", "BA901", f64::NAN, 1.0, 1),
        ];
        assert!(store.ingest_country_data(&broken, "BA", true).is_err());

        assert_eq!(store.count_by_country().unwrap()["BA"], 4);
        assert!(store.find_coordinates("BA", "BA100").unwrap().is_some());
        assert_eq!(store.find_coordinates("BA", "BA900").unwrap(), None);
    }

    #[test]
    fn test_optional_fields_are_stored() {
        let mut store = LocationStore::open_in_memory().unwrap();
        let full = record("DE", "10115", 52.5323, 13.3846, 4)
            .with_place("Berlin")
            .with_state("Berlin", "16")
            .with_county("Kreisfreie Stadt Berlin", "00")
            .with_community("Berlin", "11000");
        store.ingest_country_data(&[full], "DE", true).unwrap();

        let conn = store.state.connection().unwrap();
        let (place, county_code): (Option<String>, Option<String>) = conn
            .query_row(
                "SELECT place_name, county_code FROM location WHERE postal_code = '10115'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(place.as_deref(), Some("Berlin"));
        assert_eq!(county_code.as_deref(), Some("00"));
    }

    #[test]
    fn test_incompatible_table_is_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE location (country_code TEXT, postal_code TEXT)")
                .unwrap();
        }

        let mut store = LocationStore::open(&path).unwrap();
        assert!(!store.is_first_use().unwrap());

        let err = store
            .ingest_country_data(&first_batch(), "BA", true)
            .unwrap_err();
        match err {
            Error::SchemaMismatch { missing } => {
                assert!(missing.contains(&"latitude".to_string()));
                assert!(missing.contains(&"accuracy".to_string()));
                assert!(!missing.contains(&"postal_code".to_string()));
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_table_with_extra_columns_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                r#"
                CREATE TABLE location (
                    "index" INTEGER,
                    country_code TEXT,
                    postal_code TEXT,
                    place_name TEXT,
                    state_name TEXT,
                    state_code INTEGER,
                    county_name REAL,
                    county_code REAL,
                    community_name REAL,
                    community_code REAL,
                    latitude REAL,
                    longitude REAL,
                    accuracy INTEGER
                )
                "#,
            )
            .unwrap();
        }

        let mut store = LocationStore::open(&path).unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();
        assert_eq!(store.count_by_country().unwrap()["BA"], 4);
        // not a first use, so no index is created
        assert!(!store.postal_code_index_exists().unwrap());
    }

    #[test]
    fn test_file_store_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.db");

        let mut store = LocationStore::open(&path).unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();
        store.close().unwrap();
        assert!(path.exists());

        store.connect(&path).unwrap();
        assert!(!store.is_first_use().unwrap());
        assert_eq!(store.count_by_country().unwrap()["BA"], 4);
    }

    #[test]
    fn test_stats() {
        let mut store = LocationStore::open_in_memory().unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();
        store
            .ingest_country_data(&[record("CA", "CA100", 5.0, 6.0, 1)], "CA", true)
            .unwrap();

        let stats = store.stats().unwrap();
        assert!(!stats.first_use);
        assert!(stats.indexed);
        assert_eq!(stats.rows, 5);
        assert_eq!(stats.countries, 2);
    }

    #[test]
    fn test_custom_span() {
        let span = tracing::info_span!("import", job = "nightly");
        let mut store = LocationStore::with_span(span);
        store.connect_in_memory().unwrap();
        store.ingest_country_data(&first_batch(), "BA", true).unwrap();
        assert_eq!(store.count_rows().unwrap(), 4);
        assert!(store.table_exists().unwrap());
        assert_eq!(store.count_by_country().unwrap()["BA"], 4);
        assert!(store.find_coordinates("BA", "BA100").unwrap().is_some());
    }
}
