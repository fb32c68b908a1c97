//! Persisted record shapes
//!
//! Each struct is both a table row and the JSON object returned to the
//! caller, so cached rows and freshly fetched records serialize identically.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::Category;
use crate::store::{FeatureRow, SqliteQuery};

// == Location ==
/// A geocoded search string. Never expires and is never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: i64,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A geocoded location that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    /// Attaches the id generated by the store.
    pub fn with_id(self, id: i64) -> Location {
        Location {
            id,
            search_query: self.search_query,
            formatted_query: self.formatted_query,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

// == Weather ==
/// One day of forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Weather {
    pub location_id: i64,
    pub expiration: i64,
    pub forecast: String,
    pub time: String,
}

impl FeatureRow for Weather {
    const CATEGORY: Category = Category::Weather;
    const COLUMNS: &'static [&'static str] = &["forecast", "time"];

    fn location_id(&self) -> i64 {
        self.location_id
    }

    fn expiration(&self) -> i64 {
        self.expiration
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(self.forecast.as_str()).bind(self.time.as_str())
    }
}

// == Trail ==
/// A hiking trail near the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Trail {
    pub location_id: i64,
    pub expiration: i64,
    pub name: String,
    pub location: String,
    pub length: f64,
    pub stars: f64,
    pub star_votes: i64,
    pub summary: String,
    pub trail_url: String,
    pub conditions: String,
    pub condition_date: String,
    pub condition_time: String,
}

impl FeatureRow for Trail {
    const CATEGORY: Category = Category::Trails;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "location",
        "length",
        "stars",
        "star_votes",
        "summary",
        "trail_url",
        "conditions",
        "condition_date",
        "condition_time",
    ];

    fn location_id(&self) -> i64 {
        self.location_id
    }

    fn expiration(&self) -> i64 {
        self.expiration
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.location.as_str())
            .bind(self.length)
            .bind(self.stars)
            .bind(self.star_votes)
            .bind(self.summary.as_str())
            .bind(self.trail_url.as_str())
            .bind(self.conditions.as_str())
            .bind(self.condition_date.as_str())
            .bind(self.condition_time.as_str())
    }
}

// == Meetup ==
/// An upcoming event hosted near the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Meetup {
    pub location_id: i64,
    pub expiration: i64,
    pub link: String,
    pub name: String,
    pub creation_date: String,
    pub host: String,
}

impl FeatureRow for Meetup {
    const CATEGORY: Category = Category::Meetups;
    const COLUMNS: &'static [&'static str] = &["link", "name", "creation_date", "host"];

    fn location_id(&self) -> i64 {
        self.location_id
    }

    fn expiration(&self) -> i64 {
        self.expiration
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.link.as_str())
            .bind(self.name.as_str())
            .bind(self.creation_date.as_str())
            .bind(self.host.as_str())
    }
}

// == Yelp ==
/// A business listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Yelp {
    pub location_id: i64,
    pub expiration: i64,
    pub name: String,
    pub image_url: String,
    /// Price band such as `$$`; some listings have none
    pub price: Option<String>,
    pub rating: f64,
    pub url: String,
}

impl FeatureRow for Yelp {
    const CATEGORY: Category = Category::Yelp;
    const COLUMNS: &'static [&'static str] = &["name", "image_url", "price", "rating", "url"];

    fn location_id(&self) -> i64 {
        self.location_id
    }

    fn expiration(&self) -> i64 {
        self.expiration
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.image_url.as_str())
            .bind(self.price.as_deref())
            .bind(self.rating)
            .bind(self.url.as_str())
    }
}

// == Movie ==
/// A film matching the location's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub location_id: i64,
    pub expiration: i64,
    pub title: String,
    pub overview: String,
    pub average_votes: f64,
    pub total_votes: i64,
    pub image_url: String,
    pub popularity: f64,
    pub released_on: String,
}

impl FeatureRow for Movie {
    const CATEGORY: Category = Category::Movies;
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "overview",
        "average_votes",
        "total_votes",
        "image_url",
        "popularity",
        "released_on",
    ];

    fn location_id(&self) -> i64 {
        self.location_id
    }

    fn expiration(&self) -> i64 {
        self.expiration
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.title.as_str())
            .bind(self.overview.as_str())
            .bind(self.average_votes)
            .bind(self.total_votes)
            .bind(self.image_url.as_str())
            .bind(self.popularity)
            .bind(self.released_on.as_str())
    }
}
