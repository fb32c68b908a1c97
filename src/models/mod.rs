//! Data model for the explorer server
//!
//! Feature categories, the persisted record shapes, and the DTOs used for
//! query strings and JSON bodies.

pub mod category;
pub mod records;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use category::{Category, CategoryTtls};
pub use records::{Location, Meetup, Movie, NewLocation, Trail, Weather, Yelp};
pub use requests::{FeatureQuery, LocationRequest, LookupKey};
pub use responses::{ErrorResponse, HealthResponse};
