//! Cache Module
//!
//! Freshness-checked lookups over the persistent store: serve stored rows
//! while they are fresh, invalidate them once they expire.

mod freshness;
mod gate;


// Re-export public types
pub use freshness::{current_timestamp_ms, expires_at, Freshness};
pub use gate::{lookup, lookup_at, lookup_location, CacheOutcome};
