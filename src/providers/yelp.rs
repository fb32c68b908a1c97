//! Business listings from the Yelp Fusion search API.

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use super::CacheableCategory;
use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::models::{FeatureQuery, LookupKey, Yelp};

#[derive(Debug, Deserialize)]
pub struct BusinessSearchResponse {
    #[serde(default)]
    businesses: Vec<Business>,
}

#[derive(Debug, Deserialize)]
pub struct Business {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image_url: String,
    price: Option<String>,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    url: String,
}

/// Yelp category, searched by location text with a bearer credential.
#[derive(Debug, Clone, Copy)]
pub struct YelpFusion;

impl CacheableCategory for YelpFusion {
    type Record = Yelp;
    type Payload = BusinessSearchResponse;
    type Item = Business;

    const PROVIDER: &'static str = "yelp";
    const LOOKUP: LookupKey = LookupKey::SearchText;

    fn build_query(
        client: &Client,
        upstream: &UpstreamConfig,
        query: &FeatureQuery,
    ) -> Result<RequestBuilder> {
        let location = query.search_text()?;
        let endpoint = &upstream.yelp;
        Ok(client
            .get(endpoint.url("v3/businesses/search"))
            .query(&[("location", location)])
            .bearer_auth(&endpoint.api_key))
    }

    fn items(payload: BusinessSearchResponse) -> Vec<Business> {
        payload.businesses
    }

    fn map_record(item: Business, location_id: i64, expiration: i64) -> Yelp {
        Yelp {
            location_id,
            expiration,
            name: item.name,
            image_url: item.image_url,
            price: item.price,
            rating: item.rating,
            url: item.url,
        }
    }
}
