//! API Routes
//!
//! Configures the Axum router with all explorer endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{feature_handler, health_handler, location_handler, AppState};
use crate::providers::{DarkSky, HikingProject, MeetupEvents, Tmdb, YelpFusion};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /location` - Resolve a search string to a stored location
/// - `GET /weather` - Daily forecast for a location
/// - `GET /trails` - Nearby hiking trails
/// - `GET /meetups` - Upcoming nearby events
/// - `GET /yelp` - Business listings
/// - `GET /movies` - Films matching the location name
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, as the browser client is served elsewhere
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/location", get(location_handler))
        .route("/weather", get(feature_handler::<DarkSky>))
        .route("/trails", get(feature_handler::<HikingProject>))
        .route("/meetups", get(feature_handler::<MeetupEvents>))
        .route("/yelp", get(feature_handler::<YelpFusion>))
        .route("/movies", get(feature_handler::<Tmdb>))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
