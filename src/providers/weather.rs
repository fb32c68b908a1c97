//! Daily forecasts from the Dark Sky API.

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use super::{format_day, CacheableCategory};
use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::models::{FeatureQuery, LookupKey, Weather};

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    data: Vec<DailyPoint>,
}

#[derive(Debug, Deserialize)]
pub struct DailyPoint {
    #[serde(default)]
    summary: String,
    /// Start of the day, epoch seconds
    #[serde(default)]
    time: Option<i64>,
}

/// Weather category backed by Dark Sky.
#[derive(Debug, Clone, Copy)]
pub struct DarkSky;

impl CacheableCategory for DarkSky {
    type Record = Weather;
    type Payload = ForecastResponse;
    type Item = DailyPoint;

    const PROVIDER: &'static str = "darksky";
    const LOOKUP: LookupKey = LookupKey::Coordinates;

    fn build_query(
        client: &Client,
        upstream: &UpstreamConfig,
        query: &FeatureQuery,
    ) -> Result<RequestBuilder> {
        let (lat, lon) = query.coordinates()?;
        let endpoint = &upstream.weather;
        let path = format!("forecast/{}/{},{}", endpoint.api_key, lat, lon);
        Ok(client.get(endpoint.url(&path)))
    }

    fn items(payload: ForecastResponse) -> Vec<DailyPoint> {
        payload.daily.map(|daily| daily.data).unwrap_or_default()
    }

    fn map_record(item: DailyPoint, location_id: i64, expiration: i64) -> Weather {
        Weather {
            location_id,
            expiration,
            forecast: item.summary,
            time: format_day(item.time.and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))),
        }
    }
}
