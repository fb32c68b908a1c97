//! Request DTOs for the explorer API
//!
//! Query-string parameter bundles. Field names accept both the flat form
//! (`id=1`) and the bracketed form sent by the browser client (`data[id]=1`).

use serde::Deserialize;

use crate::error::{ExplorerError, Result};

/// Maximum accepted length of a location search string
pub const MAX_SEARCH_LENGTH: usize = 256;

/// Query for GET /location
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRequest {
    /// Free-form place name to geocode
    pub data: String,
}

impl LocationRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.data.trim().is_empty() {
            return Some("Search query cannot be empty".to_string());
        }
        if self.data.len() > MAX_SEARCH_LENGTH {
            return Some(format!(
                "Search query exceeds maximum length of {} characters",
                MAX_SEARCH_LENGTH
            ));
        }
        None
    }
}

/// What a provider needs from the query to build its upstream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKey {
    /// Latitude and longitude
    Coordinates,
    /// The original search string
    SearchText,
}

/// Query for every feature endpoint (weather, trails, meetups, yelp, movies)
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureQuery {
    /// Location id returned by GET /location
    #[serde(alias = "data[id]")]
    pub id: i64,
    #[serde(default, alias = "data[search_query]")]
    pub search_query: String,
    #[serde(default, alias = "data[latitude]")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "data[longitude]")]
    pub longitude: Option<f64>,
}

impl FeatureQuery {
    /// Fails with `InvalidRequest` unless the query carries what `key` needs.
    pub fn require(&self, key: LookupKey) -> Result<()> {
        match key {
            LookupKey::Coordinates => self.coordinates().map(|_| ()),
            LookupKey::SearchText => self.search_text().map(|_| ()),
        }
    }

    /// Returns `(latitude, longitude)`.
    pub fn coordinates(&self) -> Result<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(ExplorerError::InvalidRequest(
                "latitude and longitude are required".to_string(),
            )),
        }
    }

    pub fn search_text(&self) -> Result<&str> {
        let text = self.search_query.trim();
        if text.is_empty() {
            return Err(ExplorerError::InvalidRequest(
                "search_query is required".to_string(),
            ));
        }
        Ok(text)
    }
}
