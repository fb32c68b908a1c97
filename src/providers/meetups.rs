//! Upcoming events from the Meetup API.

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use super::{format_day, CacheableCategory};
use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::models::{FeatureQuery, LookupKey, Meetup};

#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    events: Vec<EventItem>,
}

#[derive(Debug, Deserialize)]
pub struct EventItem {
    #[serde(default)]
    link: String,
    #[serde(default)]
    name: String,
    /// Epoch milliseconds
    #[serde(default)]
    created: i64,
    group: Option<EventGroup>,
}

#[derive(Debug, Deserialize)]
struct EventGroup {
    #[serde(default)]
    name: String,
}

/// Meetups category backed by the Meetup upcoming-events search.
#[derive(Debug, Clone, Copy)]
pub struct MeetupEvents;

impl CacheableCategory for MeetupEvents {
    type Record = Meetup;
    type Payload = EventsResponse;
    type Item = EventItem;

    const PROVIDER: &'static str = "meetup";
    const LOOKUP: LookupKey = LookupKey::Coordinates;

    fn build_query(
        client: &Client,
        upstream: &UpstreamConfig,
        query: &FeatureQuery,
    ) -> Result<RequestBuilder> {
        let (lat, lon) = query.coordinates()?;
        let endpoint = &upstream.meetups;
        Ok(client.get(endpoint.url("find/upcoming_events")).query(&[
            ("key", endpoint.api_key.clone()),
            ("lon", lon.to_string()),
            ("lat", lat.to_string()),
        ]))
    }

    fn items(payload: EventsResponse) -> Vec<EventItem> {
        payload.events
    }

    fn map_record(item: EventItem, location_id: i64, expiration: i64) -> Meetup {
        Meetup {
            location_id,
            expiration,
            link: item.link,
            name: item.name,
            creation_date: format_day(chrono::DateTime::from_timestamp_millis(item.created)),
            host: item.group.map(|group| group.name).unwrap_or_default(),
        }
    }
}
