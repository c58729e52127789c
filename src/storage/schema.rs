//! Database schema definitions

/// Name of the single table holding postal code rows
pub const LOCATION_TABLE: &str = "location";

/// Name of the secondary index on postal_code
pub const POSTAL_CODE_INDEX: &str = "idx_postalcode_countrycode";

/// Columns every `location` table must carry, in insertion order
pub const LOCATION_COLUMNS: &[&str] = &[
    "country_code",
    "postal_code",
    "place_name",
    "state_name",
    "state_code",
    "county_name",
    "county_code",
    "community_name",
    "community_code",
    "latitude",
    "longitude",
    "accuracy",
];

/// SQL to create the location table
pub const CREATE_LOCATION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS location (
    country_code TEXT NOT NULL,
    postal_code TEXT NOT NULL,
    place_name TEXT,
    state_name TEXT,
    state_code TEXT,
    county_name TEXT,
    county_code TEXT,
    community_name TEXT,
    community_code TEXT,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    accuracy INTEGER NOT NULL
)
"#;

/// SQL to create the postal code index.
/// Only ever run on the first ingest.
pub const CREATE_POSTAL_CODE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_postalcode_countrycode ON location(postal_code)";

/// Look up an object of the given type and name in the schema catalogue
pub const SCHEMA_OBJECT_EXISTS: &str =
    "SELECT name FROM sqlite_master WHERE type = ?1 AND name = ?2";

pub const TABLE_INFO: &str = "PRAGMA table_info(location)";

pub const INSERT_LOCATION: &str = r#"
INSERT INTO location (
    country_code, postal_code, place_name, state_name, state_code,
    county_name, county_code, community_name, community_code,
    latitude, longitude, accuracy
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
"#;

pub const DELETE_COUNTRY: &str = "DELETE FROM location WHERE country_code = ?1";

pub const COUNT_BY_COUNTRY: &str =
    "SELECT country_code, COUNT(*) FROM location GROUP BY country_code";

pub const COUNT_ALL: &str = "SELECT COUNT(*) FROM location";

/// Newest row wins when a (country_code, postal_code) pair is duplicated
pub const FIND_COORDINATES: &str = r#"
SELECT country_code, postal_code, latitude, longitude, accuracy
FROM location
WHERE country_code = ?1
AND postal_code = ?2
ORDER BY rowid DESC
LIMIT 1
"#;
