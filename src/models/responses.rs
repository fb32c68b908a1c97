//! Response DTOs for the explorer API
//!
//! Feature endpoints return the record types directly; only the health check
//! and error bodies have dedicated shapes.

use serde::Serialize;

use crate::error::GENERIC_FAILURE;

/// Body of GET /health, sent only after the store has answered a ping.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"`; an unreachable store yields the error body instead
    pub status: String,
    /// RFC 3339 time at which the store answered
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Body of every failed request. Carries the fixed caller-facing message,
/// never the underlying store or provider detail.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// The body sent for any store, upstream or request failure.
    pub fn generic() -> Self {
        Self::new(GENERIC_FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_body_shape() {
        let value = serde_json::to_value(HealthResponse::healthy()).unwrap();
        assert_eq!(value["status"], "healthy");
        let stamp = value["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_generic_error_body() {
        let value = serde_json::to_value(ErrorResponse::generic()).unwrap();
        assert_eq!(value, json!({ "error": "Sorry, something went wrong." }));
    }
}
