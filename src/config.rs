//! Configuration Module
//!
//! Handles loading server, store and upstream settings from environment
//! variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::{Category, CategoryTtls};

// == Persist Mode ==
/// When freshly fetched records are written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Inserts finish before the response is sent; failures fail the request
    #[default]
    Await,
    /// Inserts run on a spawned task; failures are only logged
    Background,
}

impl FromStr for PersistMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "await" => Ok(PersistMode::Await),
            "background" => Ok(PersistMode::Background),
            other => Err(format!("unknown persist mode '{}'", other)),
        }
    }
}

// == Upstream Endpoints ==
/// Base URL and credential for one third-party API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub api_key: String,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn from_env(prefix: &str, key_var: &str, default_base: &str) -> Self {
        Self::new(
            env::var(format!("{}_BASE_URL", prefix)).unwrap_or_else(|_| default_base.to_string()),
            env::var(key_var).unwrap_or_default(),
        )
    }
}

/// Every third-party API the server talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub geocode: Endpoint,
    pub weather: Endpoint,
    pub trails: Endpoint,
    pub meetups: Endpoint,
    pub yelp: Endpoint,
    pub movies: Endpoint,
    /// Per-request timeout for upstream calls, in seconds
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Points every provider at the same base URL, e.g. a local mock server.
    pub fn single_host(base_url: &str) -> Self {
        let endpoint = |key: &str| Endpoint::new(base_url, key);
        Self {
            geocode: endpoint("geocode-key"),
            weather: endpoint("weather-key"),
            trails: endpoint("hiking-key"),
            meetups: endpoint("meetup-key"),
            yelp: endpoint("yelp-key"),
            movies: endpoint("tmdb-key"),
            timeout_secs: 10,
        }
    }

    fn from_env() -> Self {
        Self {
            geocode: Endpoint::from_env("GEOCODE", "GEOCODE_API_KEY", "https://maps.googleapis.com"),
            weather: Endpoint::from_env("DARKSKY", "DARKSKY_API_KEY", "https://api.darksky.net"),
            trails: Endpoint::from_env("HIKING", "HIKING_API_KEY", "https://www.hikingproject.com"),
            meetups: Endpoint::from_env("MEETUP", "MEETUP_API_KEY", "https://api.meetup.com"),
            yelp: Endpoint::from_env("YELP", "YELP_API_KEY", "https://api.yelp.com"),
            movies: Endpoint::from_env("TMDB", "TMDB_API_KEY", "https://api.themoviedb.org"),
            timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 10),
        }
    }
}

// == Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite connection URL
    pub database_url: String,
    /// Upper bound on pooled store connections
    pub database_max_connections: u32,
    /// Third-party API locations and keys
    pub upstream: UpstreamConfig,
    /// Cache lifetime per category
    pub ttls: CategoryTtls,
    /// Whether fetched records are persisted before responding
    pub persist_mode: PersistMode,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_URL` - SQLite URL (default: `sqlite://city_explorer.db`)
    /// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `GEOCODE_API_KEY`, `DARKSKY_API_KEY`, `HIKING_API_KEY`,
    ///   `MEETUP_API_KEY`, `YELP_API_KEY`, `TMDB_API_KEY` - Provider credentials
    /// - `<PROVIDER>_BASE_URL` - Override a provider's base URL
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 10)
    /// - `TTL_<CATEGORY>_SECS` - Override a category TTL, e.g. `TTL_WEATHER_SECS`
    /// - `PERSIST_MODE` - `await` or `background` (default: await)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let ttls = Category::ALL
            .into_iter()
            .fold(CategoryTtls::default(), |ttls, category| {
                let var = format!("TTL_{}_SECS", category.name().to_ascii_uppercase());
                match env::var(&var).ok().and_then(|v| v.parse().ok()) {
                    Some(secs) => ttls.with(category, Duration::from_secs(secs)),
                    None => ttls,
                }
            });

        Self {
            server_port: parse_env("PORT", defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_env(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            upstream: UpstreamConfig::from_env(),
            ttls,
            persist_mode: parse_env("PERSIST_MODE", defaults.persist_mode),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: "sqlite://city_explorer.db".to_string(),
            database_max_connections: 5,
            upstream: UpstreamConfig::single_host("http://127.0.0.1"),
            ttls: CategoryTtls::default(),
            persist_mode: PersistMode::Await,
        }
    }
}

/// Reads and parses an environment variable, falling back on absence or parse failure.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
