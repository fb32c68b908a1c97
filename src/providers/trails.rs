//! Nearby trails from the Hiking Project data API.

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use super::CacheableCategory;
use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::models::{FeatureQuery, LookupKey, Trail};

const NO_CONDITIONS: &str = "No conditions reported.";

#[derive(Debug, Deserialize)]
pub struct TrailsResponse {
    #[serde(default)]
    trails: Vec<TrailItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailItem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    length: f64,
    #[serde(default)]
    stars: f64,
    #[serde(default)]
    star_votes: i64,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    url: String,
    condition_status: Option<String>,
    condition_details: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`
    condition_date: Option<String>,
}

/// Trails category backed by the Hiking Project.
#[derive(Debug, Clone, Copy)]
pub struct HikingProject;

impl CacheableCategory for HikingProject {
    type Record = Trail;
    type Payload = TrailsResponse;
    type Item = TrailItem;

    const PROVIDER: &'static str = "hikingproject";
    const LOOKUP: LookupKey = LookupKey::Coordinates;

    fn build_query(
        client: &Client,
        upstream: &UpstreamConfig,
        query: &FeatureQuery,
    ) -> Result<RequestBuilder> {
        let (lat, lon) = query.coordinates()?;
        let endpoint = &upstream.trails;
        Ok(client.get(endpoint.url("data/get-trails")).query(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("key", endpoint.api_key.clone()),
        ]))
    }

    fn items(payload: TrailsResponse) -> Vec<TrailItem> {
        payload.trails
    }

    fn map_record(item: TrailItem, location_id: i64, expiration: i64) -> Trail {
        let conditions = describe_conditions(
            item.condition_status.as_deref(),
            item.condition_details.as_deref(),
        );
        let (condition_date, condition_time) = item
            .condition_date
            .as_deref()
            .map(split_timestamp)
            .unwrap_or_default();

        Trail {
            location_id,
            expiration,
            name: item.name,
            location: item.location,
            length: item.length,
            stars: item.stars,
            star_votes: item.star_votes,
            summary: item.summary,
            trail_url: item.url,
            conditions,
            condition_date,
            condition_time,
        }
    }
}

fn describe_conditions(status: Option<&str>, details: Option<&str>) -> String {
    let status = status.map(str::trim).filter(|s| !s.is_empty());
    let details = details.map(str::trim).filter(|s| !s.is_empty());
    match (status, details) {
        (Some(status), Some(details)) => format!("{}.  {}", status, details),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => NO_CONDITIONS.to_string(),
    }
}

fn split_timestamp(stamp: &str) -> (String, String) {
    let mut parts = stamp.splitn(2, ' ');
    let date = parts.next().unwrap_or_default().to_string();
    let time = parts.next().unwrap_or_default().to_string();
    (date, time)
}
