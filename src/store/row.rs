//! Row Contract
//!
//! What the store needs to know about a cached feature record to select,
//! insert and invalidate it generically.

use serde::Serialize;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

use crate::models::Category;

/// A parameterized SQLite statement awaiting its bind values.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A per-category record persisted in its own table.
///
/// `location_id` and `expiration` are common to every table and bound by the
/// store itself; `COLUMNS` lists the remaining columns in the order
/// `bind_columns` binds them.
pub trait FeatureRow:
    Serialize + for<'r> FromRow<'r, SqliteRow> + Clone + Send + Sync + Unpin + 'static
{
    /// Category whose table holds this record
    const CATEGORY: Category;

    /// Category-specific columns, excluding `location_id` and `expiration`
    const COLUMNS: &'static [&'static str];

    fn location_id(&self) -> i64;

    /// Absolute expiry in epoch milliseconds
    fn expiration(&self) -> i64;

    /// Binds the values for `COLUMNS`, in order.
    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

pub(crate) fn select_sql<R: FeatureRow>() -> String {
    format!(
        "SELECT location_id, expiration, {} FROM {} WHERE location_id = ? ORDER BY id",
        R::COLUMNS.join(", "),
        R::CATEGORY.table_name()
    )
}

pub(crate) fn insert_sql<R: FeatureRow>() -> String {
    let placeholders = vec!["?"; R::COLUMNS.len() + 2].join(", ");
    format!(
        "INSERT INTO {} (location_id, expiration, {}) VALUES ({})",
        R::CATEGORY.table_name(),
        R::COLUMNS.join(", "),
        placeholders
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weather;

    #[test]
    fn test_select_sql_targets_category_table() {
        let sql = select_sql::<Weather>();
        assert_eq!(
            sql,
            "SELECT location_id, expiration, forecast, time FROM weathers WHERE location_id = ? ORDER BY id"
        );
    }

    #[test]
    fn test_insert_sql_placeholder_count() {
        let sql = insert_sql::<Weather>();
        assert_eq!(
            sql,
            "INSERT INTO weathers (location_id, expiration, forecast, time) VALUES (?, ?, ?, ?)"
        );
    }
}
