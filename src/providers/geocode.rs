//! Location resolution through the Google geocoding API.
//!
//! Unlike the feature categories, a location is keyed by its search string
//! and its generated id must be read back before it is returned: every
//! other category is cached under that id.

use serde::Deserialize;
use tracing::{info, warn};

use super::{send_json, Providers};
use crate::error::{ExplorerError, Result};
use crate::models::{Location, NewLocation};
use crate::store::Store;

const PROVIDER: &str = "geocode";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl Providers {
    // == Geocode ==
    /// Geocodes a search string, stores the first result and returns it with
    /// its new id.
    pub async fn geocode(&self, store: &Store, search_query: &str) -> Result<Location> {
        let endpoint = &self.upstream.geocode;
        let request = self
            .client
            .get(endpoint.url("maps/api/geocode/json"))
            .query(&[("address", search_query), ("key", endpoint.api_key.as_str())]);

        let response: GeocodeResponse = send_json(request, PROVIDER).await?;
        let Some(first) = response.results.into_iter().next() else {
            warn!(search_query, "no data from geocode API");
            return Err(ExplorerError::UpstreamEmpty { provider: PROVIDER });
        };

        let new_location = NewLocation {
            search_query: search_query.to_string(),
            formatted_query: first.formatted_address,
            latitude: first.geometry.location.lat,
            longitude: first.geometry.location.lng,
        };
        let id = store.insert_location(&new_location).await?;

        info!(search_query, id, "geocoded and stored location");
        Ok(new_location.with_id(id))
    }
}
