//! Table definitions applied when a store is opened.
//!
//! Feature tables carry a surrogate `id` only to keep row order stable; it is
//! never selected back out, so cached rows serialize exactly like freshly
//! fetched records.

pub(crate) const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS locations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        search_query TEXT NOT NULL,
        formatted_query TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_locations_search_query ON locations (search_query)",
    "CREATE TABLE IF NOT EXISTS weathers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location_id INTEGER NOT NULL REFERENCES locations (id),
        expiration INTEGER NOT NULL,
        forecast TEXT NOT NULL,
        time TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_weathers_location ON weathers (location_id)",
    "CREATE TABLE IF NOT EXISTS trails (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location_id INTEGER NOT NULL REFERENCES locations (id),
        expiration INTEGER NOT NULL,
        name TEXT NOT NULL,
        location TEXT NOT NULL,
        length REAL NOT NULL,
        stars REAL NOT NULL,
        star_votes INTEGER NOT NULL,
        summary TEXT NOT NULL,
        trail_url TEXT NOT NULL,
        conditions TEXT NOT NULL,
        condition_date TEXT NOT NULL,
        condition_time TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_trails_location ON trails (location_id)",
    "CREATE TABLE IF NOT EXISTS meetups (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location_id INTEGER NOT NULL REFERENCES locations (id),
        expiration INTEGER NOT NULL,
        link TEXT NOT NULL,
        name TEXT NOT NULL,
        creation_date TEXT NOT NULL,
        host TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_meetups_location ON meetups (location_id)",
    "CREATE TABLE IF NOT EXISTS yelps (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location_id INTEGER NOT NULL REFERENCES locations (id),
        expiration INTEGER NOT NULL,
        name TEXT NOT NULL,
        image_url TEXT NOT NULL,
        price TEXT,
        rating REAL NOT NULL,
        url TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_yelps_location ON yelps (location_id)",
    "CREATE TABLE IF NOT EXISTS movies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location_id INTEGER NOT NULL REFERENCES locations (id),
        expiration INTEGER NOT NULL,
        title TEXT NOT NULL,
        overview TEXT NOT NULL,
        average_votes REAL NOT NULL,
        total_votes INTEGER NOT NULL,
        image_url TEXT NOT NULL,
        popularity REAL NOT NULL,
        released_on TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_movies_location ON movies (location_id)",
];
