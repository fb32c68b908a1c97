//! API Module
//!
//! HTTP handlers and routing for the explorer REST API.
//!
//! # Endpoints
//! - `GET /location` - Resolve a search string to a stored location
//! - `GET /weather`, `/trails`, `/meetups`, `/yelp`, `/movies` - Cached
//!   category data for a location
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
