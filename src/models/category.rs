//! Feature categories and their cache lifetimes.

use std::fmt;
use std::time::Duration;

const HOUR: u64 = 60 * 60;
const DAY: u64 = 24 * HOUR;

// == Category ==
/// A kind of location data cached in its own table.
///
/// Locations themselves are not a category: they never expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Weather,
    Trails,
    Meetups,
    Yelp,
    Movies,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Weather,
        Category::Trails,
        Category::Meetups,
        Category::Yelp,
        Category::Movies,
    ];

    /// Table holding this category's rows.
    pub const fn table_name(self) -> &'static str {
        match self {
            Category::Weather => "weathers",
            Category::Trails => "trails",
            Category::Meetups => "meetups",
            Category::Yelp => "yelps",
            Category::Movies => "movies",
        }
    }

    /// Lowercase name used in logs and configuration keys.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Weather => "weather",
            Category::Trails => "trails",
            Category::Meetups => "meetups",
            Category::Yelp => "yelp",
            Category::Movies => "movies",
        }
    }

    /// Built-in time-to-live before cached rows are refetched.
    pub const fn default_ttl(self) -> Duration {
        match self {
            Category::Weather => Duration::from_secs(3 * HOUR),
            Category::Trails => Duration::from_secs(6 * HOUR),
            Category::Meetups | Category::Yelp => Duration::from_secs(DAY),
            Category::Movies => Duration::from_secs(7 * DAY),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// == Category TTLs ==
/// Effective time-to-live per category, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTtls {
    weather: Duration,
    trails: Duration,
    meetups: Duration,
    yelp: Duration,
    movies: Duration,
}

impl CategoryTtls {
    pub fn get(&self, category: Category) -> Duration {
        match category {
            Category::Weather => self.weather,
            Category::Trails => self.trails,
            Category::Meetups => self.meetups,
            Category::Yelp => self.yelp,
            Category::Movies => self.movies,
        }
    }

    /// Returns a copy with one category's TTL replaced.
    pub fn with(mut self, category: Category, ttl: Duration) -> Self {
        let slot = match category {
            Category::Weather => &mut self.weather,
            Category::Trails => &mut self.trails,
            Category::Meetups => &mut self.meetups,
            Category::Yelp => &mut self.yelp,
            Category::Movies => &mut self.movies,
        };
        *slot = ttl;
        self
    }
}

impl Default for CategoryTtls {
    fn default() -> Self {
        Self {
            weather: Category::Weather.default_ttl(),
            trails: Category::Trails.default_ttl(),
            meetups: Category::Meetups.default_ttl(),
            yelp: Category::Yelp.default_ttl(),
            movies: Category::Movies.default_ttl(),
        }
    }
}
