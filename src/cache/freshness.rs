//! Freshness Module
//!
//! Expiration arithmetic and the fresh/expired/absent classification applied
//! to cached rows.

use std::time::Duration;

// == Freshness ==
/// State of a location's cached rows for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Rows exist and the first one has not expired
    Fresh,
    /// Rows exist but the first one has expired
    Expired,
    /// No rows at all
    Absent,
}

impl Freshness {
    // == Classify ==
    /// Classifies a row set by the expiration of its first row.
    ///
    /// Boundary condition: a row whose expiration equals `now_ms` is already
    /// expired. Only the first row is inspected; rows for one location and
    /// category are always written together with the same expiration.
    pub fn classify(first_expiration: Option<i64>, now_ms: i64) -> Self {
        match first_expiration {
            None => Freshness::Absent,
            Some(expiration) if expiration > now_ms => Freshness::Fresh,
            Some(_) => Freshness::Expired,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Absolute expiration for a record created at `now_ms` with the given TTL.
pub fn expires_at(now_ms: i64, ttl: Duration) -> i64 {
    let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    now_ms.saturating_add(ttl_ms)
}
