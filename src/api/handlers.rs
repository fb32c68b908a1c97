//! API Handlers
//!
//! HTTP request handlers. Every feature endpoint shares one generic handler:
//! consult the cache gate, serve stored rows on a hit, fetch through the
//! category's provider on a miss.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::info;

use crate::cache::{self, CacheOutcome};
use crate::config::Config;
use crate::error::{ExplorerError, Result};
use crate::models::{FeatureQuery, HealthResponse, Location, LocationRequest};
use crate::providers::{CacheableCategory, Providers};
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Holds only the store pool and the upstream client; there is no other
/// shared mutable state between requests.
#[derive(Clone)]
pub struct AppState {
    /// Relational cache
    pub store: Store,
    /// Third-party API adapters
    pub providers: Arc<Providers>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(store: Store, providers: Providers) -> Self {
        Self {
            store,
            providers: Arc::new(providers),
        }
    }

    /// Creates a new AppState from configuration and an opened store.
    pub fn from_config(config: &Config, store: Store) -> Result<Self> {
        let providers = Providers::new(
            config.upstream.clone(),
            config.ttls.clone(),
            config.persist_mode,
        )?;
        Ok(Self::new(store, providers))
    }
}

/// Handler for GET /location?data=<search>
///
/// Returns the stored location for an exact search string, geocoding and
/// storing it first if it has never been seen.
pub async fn location_handler(
    State(state): State<AppState>,
    req: std::result::Result<Query<LocationRequest>, QueryRejection>,
) -> Result<Json<Location>> {
    let Query(req) = req?;
    if let Some(error_msg) = req.validate() {
        return Err(ExplorerError::InvalidRequest(error_msg));
    }

    match cache::lookup_location(&state.store, &req.data).await? {
        CacheOutcome::Hit(location) => Ok(Json(location)),
        CacheOutcome::Miss => {
            let location = state.providers.geocode(&state.store, &req.data).await?;
            Ok(Json(location))
        }
    }
}

/// Handler for every feature endpoint, parameterized by category.
///
/// A hit serializes the stored rows verbatim; a miss serializes whatever the
/// provider returned after persisting it. Malformed query strings surface as
/// `InvalidRequest`, like missing coordinates.
pub async fn feature_handler<C: CacheableCategory>(
    State(state): State<AppState>,
    query: std::result::Result<Query<FeatureQuery>, QueryRejection>,
) -> Result<Json<Vec<C::Record>>> {
    let Query(query) = query?;
    query.require(C::LOOKUP)?;

    match cache::lookup::<C::Record>(&state.store, query.id).await? {
        CacheOutcome::Hit(rows) => Ok(Json(rows)),
        CacheOutcome::Miss => {
            info!(provider = C::PROVIDER, location_id = query.id, "fetching from API");
            let records = state.providers.fetch::<C>(&state.store, &query).await?;
            Ok(Json(records))
        }
    }
}

/// Handler for GET /health
///
/// Reports healthy once the store answers a trivial query.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    state.store.ping().await?;
    Ok(Json(HealthResponse::healthy()))
}
