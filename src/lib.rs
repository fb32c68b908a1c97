//! City Explorer - A location lookup proxy with a relational cache
//!
//! Geocodes search strings and serves weather, trail, meetup, business and
//! movie data per location, keeping each category in the store until its
//! time-to-live runs out.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod store;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ExplorerError, Result};
pub use store::Store;
