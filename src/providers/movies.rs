//! Films matching the location name, from The Movie Database search.

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use super::CacheableCategory;
use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::models::{FeatureQuery, LookupKey, Movie};

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w200_and_h300_bestv2";
const MAX_OVERVIEW_CHARS: usize = 255;

#[derive(Debug, Deserialize)]
pub struct MovieSearchResponse {
    #[serde(default)]
    results: Vec<MovieItem>,
}

#[derive(Debug, Deserialize)]
pub struct MovieItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    vote_count: i64,
    poster_path: Option<String>,
    #[serde(default)]
    popularity: f64,
    #[serde(default)]
    release_date: String,
}

/// Movies category backed by TMDB, searched by location text.
#[derive(Debug, Clone, Copy)]
pub struct Tmdb;

impl CacheableCategory for Tmdb {
    type Record = Movie;
    type Payload = MovieSearchResponse;
    type Item = MovieItem;

    const PROVIDER: &'static str = "tmdb";
    const LOOKUP: LookupKey = LookupKey::SearchText;

    fn build_query(
        client: &Client,
        upstream: &UpstreamConfig,
        query: &FeatureQuery,
    ) -> Result<RequestBuilder> {
        let text = query.search_text()?;
        let endpoint = &upstream.movies;
        Ok(client
            .get(endpoint.url("3/search/movie"))
            .query(&[("api_key", endpoint.api_key.as_str()), ("query", text)]))
    }

    fn items(payload: MovieSearchResponse) -> Vec<MovieItem> {
        payload.results
    }

    fn map_record(item: MovieItem, location_id: i64, expiration: i64) -> Movie {
        let image_url = item
            .poster_path
            .map(|poster| format!("{}/{}", POSTER_BASE, poster.trim_start_matches('/')))
            .unwrap_or_default();

        Movie {
            location_id,
            expiration,
            title: item.title,
            overview: item.overview.chars().take(MAX_OVERVIEW_CHARS).collect(),
            average_votes: item.vote_average,
            total_votes: item.vote_count,
            image_url,
            popularity: item.popularity,
            released_on: item.release_date,
        }
    }
}
