//! Location types - rows of the `location` table and the lookup projection
//!
//! A `LocationRecord` carries the full descriptive row as found in public
//! postal-code dumps. Lookups only ever return the `Coordinates` projection.

use serde::Serialize;

/// One postal code entry for a country.
///
/// Administrative subdivisions are optional: many countries only publish
/// a subset of them.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    /// Two character ISO country code
    pub country_code: String,
    /// Postal code, unique only together with the country code
    pub postal_code: String,
    pub place_name: Option<String>,
    /// First order subdivision (state)
    pub state_name: Option<String>,
    pub state_code: Option<String>,
    /// Second order subdivision (county/province)
    pub county_name: Option<String>,
    pub county_code: Option<String>,
    /// Third order subdivision (community)
    pub community_name: Option<String>,
    pub community_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Dataset precision code, 1 being the most precise in typical dumps
    pub accuracy: i64,
}

impl LocationRecord {
    /// Create a record with only the required fields set
    pub fn new(
        country_code: impl Into<String>,
        postal_code: impl Into<String>,
        latitude: f64,
        longitude: f64,
        accuracy: i64,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            postal_code: postal_code.into(),
            place_name: None,
            state_name: None,
            state_code: None,
            county_name: None,
            county_code: None,
            community_name: None,
            community_code: None,
            latitude,
            longitude,
            accuracy,
        }
    }

    /// Set the place name
    pub fn with_place(mut self, place_name: impl Into<String>) -> Self {
        self.place_name = Some(place_name.into());
        self
    }

    /// Set the state name and code
    pub fn with_state(mut self, name: impl Into<String>, code: impl Into<String>) -> Self {
        self.state_name = Some(name.into());
        self.state_code = Some(code.into());
        self
    }

    /// Set the county name and code
    pub fn with_county(mut self, name: impl Into<String>, code: impl Into<String>) -> Self {
        self.county_name = Some(name.into());
        self.county_code = Some(code.into());
        self
    }

    /// Set the community name and code
    pub fn with_community(mut self, name: impl Into<String>, code: impl Into<String>) -> Self {
        self.community_name = Some(name.into());
        self.community_code = Some(code.into());
        self
    }

    /// Project the record down to what a lookup returns
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            country_code: self.country_code.clone(),
            postal_code: self.postal_code.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy: self.accuracy,
        }
    }
}

/// Result of a postal code lookup.
///
/// ```json
/// { "country_code": "GB", "postal_code": "SW1W 0NY",
///   "latitude": 51.4954, "longitude": -0.1474, "accuracy": 6 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    pub country_code: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: i64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {:.4}, {:.4} (accuracy {})",
            self.country_code, self.postal_code, self.latitude, self.longitude, self.accuracy
        )
    }
}
