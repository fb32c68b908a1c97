//! Store Module
//!
//! Parameterized access to the relational cache: one table per feature
//! category plus the `locations` table.

mod row;
mod schema;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Category, Location, NewLocation};

pub use row::{FeatureRow, SqliteQuery};

// == Store ==
/// Handle to the SQLite pool. Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    // == Constructor ==
    /// Opens (creating if missing) the database at `url` and applies the schema.
    ///
    /// An in-memory URL is pinned to a single long-lived connection, since
    /// every SQLite connection to `:memory:` sees its own empty database.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(10));
        pool_options = if url.contains(":memory:") {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;

        info!(url, "Store connected and schema applied");
        Ok(store)
    }

    /// Opens a private in-memory store.
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    async fn migrate(&self) -> Result<()> {
        for statement in schema::SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Round-trips a trivial statement to prove the pool is usable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the pool; every later query fails.
    #[cfg(test)]
    pub(crate) async fn close(&self) {
        self.pool.close().await;
    }

    // == Locations ==
    /// Finds the first location stored under exactly this search string.
    pub async fn find_location(&self, search_query: &str) -> Result<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, search_query, formatted_query, latitude, longitude
             FROM locations WHERE search_query = ? ORDER BY id LIMIT 1",
        )
        .bind(search_query)
        .fetch_optional(&self.pool)
        .await?;
        Ok(location)
    }

    /// Inserts a location and returns its generated id.
    ///
    /// There is no uniqueness constraint on `search_query`: two concurrent
    /// resolutions of the same string may both insert.
    pub async fn insert_location(&self, location: &NewLocation) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO locations (search_query, formatted_query, latitude, longitude)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&location.search_query)
        .bind(&location.formatted_query)
        .bind(location.latitude)
        .bind(location.longitude)
        .fetch_one(&self.pool)
        .await?;

        debug!(id, search_query = %location.search_query, "Inserted location");
        Ok(id)
    }

    // == Feature Rows ==
    /// Selects every row of `R`'s table for a location, in insertion order.
    pub async fn select_features<R: FeatureRow>(&self, location_id: i64) -> Result<Vec<R>> {
        let sql = row::select_sql::<R>();
        let rows = sqlx::query_as::<_, R>(&sql)
            .bind(location_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Inserts a single feature record.
    pub async fn insert_feature<R: FeatureRow>(&self, record: &R) -> Result<()> {
        let sql = row::insert_sql::<R>();
        let query = sqlx::query(&sql)
            .bind(record.location_id())
            .bind(record.expiration());
        record.bind_columns(query).execute(&self.pool).await?;
        Ok(())
    }

    /// Deletes every row of a category for a location, returning the count.
    pub async fn delete_features(&self, category: Category, location_id: i64) -> Result<u64> {
        let sql = format!("DELETE FROM {} WHERE location_id = ?", category.table_name());
        let result = sqlx::query(&sql)
            .bind(location_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Trail, Weather};

    fn seattle() -> NewLocation {
        NewLocation {
            search_query: "Seattle, WA".to_string(),
            formatted_query: "Seattle, WA, USA".to_string(),
            latitude: 47.6062,
            longitude: -122.3321,
        }
    }

    fn weather(location_id: i64, expiration: i64, forecast: &str) -> Weather {
        Weather {
            location_id,
            expiration,
            forecast: forecast.to_string(),
            time: "Mon Jan 01 2024".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_ping() {
        let store = Store::in_memory().await.unwrap();
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_location_insert_and_find() {
        let store = Store::in_memory().await.unwrap();

        let id = store.insert_location(&seattle()).await.unwrap();
        let found = store.find_location("Seattle, WA").await.unwrap().unwrap();

        assert_eq!(found.id, id);
        assert_eq!(found.formatted_query, "Seattle, WA, USA");
        assert!((found.latitude - 47.6062).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_find_location_is_exact_match() {
        let store = Store::in_memory().await.unwrap();
        store.insert_location(&seattle()).await.unwrap();

        assert!(store.find_location("seattle, wa").await.unwrap().is_none());
        assert!(store.find_location("Seattle").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_location_inserts_are_allowed() {
        let store = Store::in_memory().await.unwrap();

        let first = store.insert_location(&seattle()).await.unwrap();
        let second = store.insert_location(&seattle()).await.unwrap();

        assert_ne!(first, second);
        // Lookup keeps returning the oldest row
        let found = store.find_location("Seattle, WA").await.unwrap().unwrap();
        assert_eq!(found.id, first);
    }

    #[tokio::test]
    async fn test_feature_rows_keep_insertion_order() {
        let store = Store::in_memory().await.unwrap();
        let id = store.insert_location(&seattle()).await.unwrap();

        store.insert_feature(&weather(id, 100, "Rain")).await.unwrap();
        store.insert_feature(&weather(id, 100, "Clouds")).await.unwrap();

        let rows: Vec<Weather> = store.select_features(id).await.unwrap();
        assert_eq!(rows, vec![weather(id, 100, "Rain"), weather(id, 100, "Clouds")]);
    }

    #[tokio::test]
    async fn test_select_features_scoped_to_location_and_table() {
        let store = Store::in_memory().await.unwrap();
        let seattle_id = store.insert_location(&seattle()).await.unwrap();
        let other_id = store
            .insert_location(&NewLocation {
                search_query: "Portland".to_string(),
                ..seattle()
            })
            .await
            .unwrap();

        store
            .insert_feature(&weather(seattle_id, 100, "Rain"))
            .await
            .unwrap();

        let other: Vec<Weather> = store.select_features(other_id).await.unwrap();
        assert!(other.is_empty());

        let trails: Vec<Trail> = store.select_features(seattle_id).await.unwrap();
        assert!(trails.is_empty());
    }

    #[tokio::test]
    async fn test_delete_features() {
        let store = Store::in_memory().await.unwrap();
        let id = store.insert_location(&seattle()).await.unwrap();

        store.insert_feature(&weather(id, 1, "Rain")).await.unwrap();
        store.insert_feature(&weather(id, 1, "Sun")).await.unwrap();

        let removed = store.delete_features(Category::Weather, id).await.unwrap();
        assert_eq!(removed, 2);

        let rows: Vec<Weather> = store.select_features(id).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_feature_requires_existing_location() {
        let store = Store::in_memory().await.unwrap();

        let result = store.insert_feature(&weather(999, 1, "Rain")).await;
        assert!(result.is_err());
    }
}
