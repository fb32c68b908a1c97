//! Provider Module
//!
//! Adapters for the third-party APIs behind each category. One generic
//! fetch path calls the API, maps every result item into the category's
//! record, persists the records and hands them back; each provider only
//! describes its request and its payload.

mod geocode;
mod meetups;
mod movies;
mod trails;
mod weather;
mod yelp;

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::cache::{current_timestamp_ms, expires_at};
use crate::config::{PersistMode, UpstreamConfig};
use crate::error::{ExplorerError, Result};
use crate::models::{CategoryTtls, FeatureQuery, LookupKey};
use crate::store::{FeatureRow, Store};

pub use meetups::MeetupEvents;
pub use movies::Tmdb;
pub use trails::HikingProject;
pub use weather::DarkSky;
pub use yelp::YelpFusion;

// == Cacheable Category ==
/// A category whose rows come from one third-party API.
///
/// Implementors are marker types; everything is associated data or a pure
/// function, so the same fetch, cache and handler code serves every category.
pub trait CacheableCategory: Send + Sync + 'static {
    /// Row persisted for each upstream result
    type Record: FeatureRow;
    /// Whole decoded response body
    type Payload: DeserializeOwned + Send;
    /// One result within the payload
    type Item: Send;

    /// Provider name used in logs and errors
    const PROVIDER: &'static str;
    /// What the upstream request is keyed on
    const LOOKUP: LookupKey;

    fn table_name() -> &'static str {
        <Self::Record as FeatureRow>::CATEGORY.table_name()
    }

    fn ttl(ttls: &CategoryTtls) -> Duration {
        ttls.get(<Self::Record as FeatureRow>::CATEGORY)
    }

    /// Builds the upstream request for a location.
    fn build_query(
        client: &Client,
        upstream: &UpstreamConfig,
        query: &FeatureQuery,
    ) -> Result<RequestBuilder>;

    /// Extracts the result items; empty means the provider had nothing.
    fn items(payload: Self::Payload) -> Vec<Self::Item>;

    /// Maps one result item into a stored record.
    fn map_record(item: Self::Item, location_id: i64, expiration: i64) -> Self::Record;
}

// == Providers ==
/// Shared HTTP client plus everything the adapters need to call upstream.
#[derive(Debug, Clone)]
pub struct Providers {
    client: Client,
    upstream: UpstreamConfig,
    ttls: CategoryTtls,
    persist: PersistMode,
}

impl Providers {
    pub fn new(upstream: UpstreamConfig, ttls: CategoryTtls, persist: PersistMode) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(upstream.timeout_secs))
            .build()
            .map_err(ExplorerError::upstream("http-client"))?;

        Ok(Self {
            client,
            upstream,
            ttls,
            persist,
        })
    }

    // == Fetch ==
    /// Calls `C`'s provider for a location and persists the mapped records.
    ///
    /// Fails with `UpstreamEmpty` when the provider returns no items, in which
    /// case nothing is written.
    pub async fn fetch<C: CacheableCategory>(
        &self,
        store: &Store,
        query: &FeatureQuery,
    ) -> Result<Vec<C::Record>> {
        let request = C::build_query(&self.client, &self.upstream, query)?;
        let payload: C::Payload = send_json(request, C::PROVIDER).await?;

        let items = C::items(payload);
        if items.is_empty() {
            warn!(provider = C::PROVIDER, location_id = query.id, "no data from API");
            return Err(ExplorerError::UpstreamEmpty {
                provider: C::PROVIDER,
            });
        }

        let expiration = expires_at(current_timestamp_ms(), C::ttl(&self.ttls));
        let records: Vec<C::Record> = items
            .into_iter()
            .map(|item| C::map_record(item, query.id, expiration))
            .collect();

        self.persist(store, &records).await?;
        info!(
            provider = C::PROVIDER,
            table = C::table_name(),
            location_id = query.id,
            rows = records.len(),
            "fetched from API"
        );

        Ok(records)
    }

    // == Persist ==
    /// Writes records one insert at a time, per the configured mode.
    async fn persist<R: FeatureRow>(&self, store: &Store, records: &[R]) -> Result<()> {
        match self.persist {
            PersistMode::Await => {
                for record in records {
                    store.insert_feature(record).await?;
                }
            }
            PersistMode::Background => {
                let store = store.clone();
                let records = records.to_vec();
                tokio::spawn(async move {
                    for record in &records {
                        if let Err(err) = store.insert_feature(record).await {
                            warn!(category = %R::CATEGORY, error = %err, "background insert failed");
                        }
                    }
                    debug!(category = %R::CATEGORY, rows = records.len(), "background insert finished");
                });
            }
        }
        Ok(())
    }
}

/// Sends a request and decodes a JSON body, treating non-2xx as failure.
async fn send_json<T: DeserializeOwned>(request: RequestBuilder, provider: &'static str) -> Result<T> {
    let response = request
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(ExplorerError::upstream(provider))?;

    response
        .json::<T>()
        .await
        .map_err(ExplorerError::upstream(provider))
}

/// Renders an instant as a day string such as `Mon Jan 01 2024`.
fn format_day(instant: Option<chrono::DateTime<chrono::Utc>>) -> String {
    instant
        .map(|day| day.format("%a %b %d %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod test_support {
    use wiremock::MockServer;

    use super::Providers;
    use crate::config::{PersistMode, UpstreamConfig};
    use crate::models::{CategoryTtls, FeatureQuery, NewLocation};
    use crate::store::Store;

    pub fn providers_for(server: &MockServer, persist: PersistMode) -> Providers {
        Providers::new(
            UpstreamConfig::single_host(&server.uri()),
            CategoryTtls::default(),
            persist,
        )
        .unwrap()
    }

    pub async fn seattle_store() -> (Store, FeatureQuery) {
        let store = Store::in_memory().await.unwrap();
        let id = store
            .insert_location(&NewLocation {
                search_query: "Seattle, WA".to_string(),
                formatted_query: "Seattle, WA, USA".to_string(),
                latitude: 47.6062,
                longitude: -122.3321,
            })
            .await
            .unwrap();
        let query = FeatureQuery {
            id,
            search_query: "Seattle, WA".to_string(),
            latitude: Some(47.6062),
            longitude: Some(-122.3321),
        };
        (store, query)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{providers_for, seattle_store};
    use super::*;
    use crate::models::{Category, Weather};
    use serde_json::json;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn forecast_body() -> serde_json::Value {
        json!({
            "daily": {
                "data": [
                    { "summary": "Light rain", "time": 1_704_067_200 },
                    { "summary": "Partly cloudy", "time": 1_704_153_600 }
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_persists_records_with_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/forecast/.+"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let providers = providers_for(&server, PersistMode::Await);
        let (store, query) = seattle_store().await;

        let before = current_timestamp_ms();
        let records = providers.fetch::<DarkSky>(&store, &query).await.unwrap();
        let after = current_timestamp_ms();

        assert_eq!(records.len(), 2);
        let ttl = 3 * HOUR_MS;
        for record in &records {
            assert_eq!(record.location_id, query.id);
            assert!(record.expiration >= before + ttl && record.expiration <= after + ttl);
        }

        let stored: Vec<Weather> = store.select_features(query.id).await.unwrap();
        assert_eq!(stored, records);
    }

    #[tokio::test]
    async fn test_fetch_empty_payload_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/forecast/.+"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "daily": { "data": [] } })))
            .mount(&server)
            .await;

        let providers = providers_for(&server, PersistMode::Await);
        let (store, query) = seattle_store().await;

        let result = providers.fetch::<DarkSky>(&store, &query).await;
        assert!(matches!(
            result,
            Err(ExplorerError::UpstreamEmpty { provider: "darksky" })
        ));

        let stored: Vec<Weather> = store.select_features(query.id).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_upstream_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let providers = providers_for(&server, PersistMode::Await);
        let (store, query) = seattle_store().await;

        let result = providers.fetch::<DarkSky>(&store, &query).await;
        assert!(matches!(result, Err(ExplorerError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_fetch_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let providers = providers_for(&server, PersistMode::Await);
        let (store, query) = seattle_store().await;

        let result = providers.fetch::<DarkSky>(&store, &query).await;
        assert!(matches!(result, Err(ExplorerError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_fetch_background_persist_eventually_lands() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/forecast/.+"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(&server)
            .await;

        let providers = providers_for(&server, PersistMode::Background);
        let (store, query) = seattle_store().await;

        let records = providers.fetch::<DarkSky>(&store, &query).await.unwrap();
        assert_eq!(records.len(), 2);

        let mut stored: Vec<Weather> = Vec::new();
        for _ in 0..50 {
            stored = store.select_features(query.id).await.unwrap();
            if stored.len() == records.len() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(stored, records);
    }

    #[tokio::test]
    async fn test_fetch_await_mode_surfaces_store_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(&server)
            .await;

        let providers = providers_for(&server, PersistMode::Await);
        let (store, mut query) = seattle_store().await;
        // No such location: the foreign key rejects the insert
        query.id = 9_999;

        let result = providers.fetch::<DarkSky>(&store, &query).await;
        assert!(matches!(result, Err(ExplorerError::Store(_))));
    }

    #[test]
    fn test_category_metadata() {
        assert_eq!(DarkSky::table_name(), "weathers");
        assert_eq!(
            DarkSky::ttl(&CategoryTtls::default()),
            Category::Weather.default_ttl()
        );
        assert_eq!(Tmdb::table_name(), "movies");
        assert_eq!(YelpFusion::LOOKUP, LookupKey::SearchText);
        assert_eq!(HikingProject::LOOKUP, LookupKey::Coordinates);
    }

    #[test]
    fn test_format_day() {
        let day = chrono::DateTime::from_timestamp(1_704_067_200, 0);
        assert_eq!(format_day(day), "Mon Jan 01 2024");
        assert_eq!(format_day(None), "");
    }
}
