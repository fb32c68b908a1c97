//! Cache Gate Module
//!
//! Decides, per request, whether persisted rows can be served or must be
//! invalidated and refetched. Freshness is checked lazily on access; nothing
//! sweeps expired rows in the background.

use tracing::info;

use crate::cache::{current_timestamp_ms, Freshness};
use crate::error::Result;
use crate::models::Location;
use crate::store::{FeatureRow, Store};

// == Cache Outcome ==
/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheOutcome<T> {
    /// Stored data that can be served as-is
    Hit(T),
    /// Nothing usable is stored; the caller must fetch
    Miss,
}

// == Feature Lookup ==
/// Looks up a location's cached rows for `R`'s category.
///
/// Expired rows are deleted before `Miss` is returned. Store failures
/// propagate; they never degrade into a miss.
pub async fn lookup<R: FeatureRow>(store: &Store, location_id: i64) -> Result<CacheOutcome<Vec<R>>> {
    lookup_at(store, location_id, current_timestamp_ms()).await
}

/// [`lookup`] against an explicit clock reading.
pub async fn lookup_at<R: FeatureRow>(
    store: &Store,
    location_id: i64,
    now_ms: i64,
) -> Result<CacheOutcome<Vec<R>>> {
    let category = R::CATEGORY;
    let rows = store.select_features::<R>(location_id).await?;

    match Freshness::classify(rows.first().map(|row| row.expiration()), now_ms) {
        Freshness::Fresh => {
            info!(%category, location_id, rows = rows.len(), "fresh: cache hit");
            Ok(CacheOutcome::Hit(rows))
        }
        Freshness::Expired => {
            let removed = store.delete_features(category, location_id).await?;
            info!(%category, location_id, removed, "expired: rows invalidated, cache miss");
            Ok(CacheOutcome::Miss)
        }
        Freshness::Absent => {
            info!(%category, location_id, "no rows: cache miss");
            Ok(CacheOutcome::Miss)
        }
    }
}

// == Location Lookup ==
/// Looks up a previously geocoded search string. Locations never expire.
pub async fn lookup_location(store: &Store, search_query: &str) -> Result<CacheOutcome<Location>> {
    match store.find_location(search_query).await? {
        Some(location) => {
            info!(search_query, id = location.id, "location: cache hit");
            Ok(CacheOutcome::Hit(location))
        }
        None => {
            info!(search_query, "location: cache miss");
            Ok(CacheOutcome::Miss)
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExplorerError;
    use crate::models::{NewLocation, Trail, Weather};

    const HOUR_MS: i64 = 60 * 60 * 1000;

    async fn store_with_location() -> (Store, i64) {
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
        (store, id)
    }

    fn trail(location_id: i64, expiration: i64, name: &str) -> Trail {
        Trail {
            location_id,
            expiration,
            name: name.to_string(),
            location: "Issaquah, Washington".to_string(),
            length: 4.2,
            stars: 4.5,
            star_votes: 12,
            summary: "Forest loop".to_string(),
            trail_url: "https://example.com/trail".to_string(),
            conditions: "All Clear.  Dry".to_string(),
            condition_date: "2024-05-01".to_string(),
            condition_time: "10:00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_absent_rows_are_a_miss() {
        let (store, id) = store_with_location().await;

        let outcome = lookup::<Weather>(&store, id).await.unwrap();
        assert_eq!(outcome, CacheOutcome::Miss);
    }

    #[tokio::test]
    async fn test_fresh_rows_are_a_hit_verbatim() {
        let (store, id) = store_with_location().await;
        let now = current_timestamp_ms();
        let rows = vec![
            trail(id, now + HOUR_MS, "Poo Poo Point"),
            trail(id, now + HOUR_MS, "Rattlesnake Ledge"),
        ];
        for row in &rows {
            store.insert_feature(row).await.unwrap();
        }

        let outcome = lookup::<Trail>(&store, id).await.unwrap();
        assert_eq!(outcome, CacheOutcome::Hit(rows));
    }

    #[tokio::test]
    async fn test_expired_rows_are_deleted_then_miss() {
        let (store, id) = store_with_location().await;
        let now = current_timestamp_ms();
        store
            .insert_feature(&Weather {
                location_id: id,
                expiration: now - HOUR_MS,
                forecast: "Drizzle".to_string(),
                time: "Mon Jan 01 2024".to_string(),
            })
            .await
            .unwrap();

        let outcome = lookup::<Weather>(&store, id).await.unwrap();
        assert_eq!(outcome, CacheOutcome::Miss);

        let remaining: Vec<Weather> = store.select_features(id).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_at_boundary_is_expired() {
        let (store, id) = store_with_location().await;
        store.insert_feature(&trail(id, 5_000, "Edge")).await.unwrap();

        let outcome = lookup_at::<Trail>(&store, id, 5_000).await.unwrap();
        assert_eq!(outcome, CacheOutcome::Miss);
    }

    #[tokio::test]
    async fn test_expiry_only_touches_one_category() {
        let (store, id) = store_with_location().await;
        let now = current_timestamp_ms();
        store.insert_feature(&trail(id, now + HOUR_MS, "Keep")).await.unwrap();
        store
            .insert_feature(&Weather {
                location_id: id,
                expiration: now - HOUR_MS,
                forecast: "Old".to_string(),
                time: "Mon Jan 01 2024".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(lookup::<Weather>(&store, id).await.unwrap(), CacheOutcome::Miss);
        assert!(matches!(
            lookup::<Trail>(&store, id).await.unwrap(),
            CacheOutcome::Hit(rows) if rows.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_lookup_location_hit_and_miss() {
        let (store, id) = store_with_location().await;

        match lookup_location(&store, "Seattle, WA").await.unwrap() {
            CacheOutcome::Hit(location) => assert_eq!(location.id, id),
            CacheOutcome::Miss => panic!("expected a hit"),
        }
        assert_eq!(
            lookup_location(&store, "Tacoma, WA").await.unwrap(),
            CacheOutcome::Miss
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_miss() {
        let (store, id) = store_with_location().await;
        store.close().await;

        let result = lookup::<Weather>(&store, id).await;
        assert!(matches!(result, Err(ExplorerError::Store(_))));

        let result = lookup_location(&store, "Seattle, WA").await;
        assert!(matches!(result, Err(ExplorerError::Store(_))));
    }
}
