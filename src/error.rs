//! Error types for the explorer server
//!
//! Every failure is logged in full locally but reaches the caller only as a
//! fixed message with a fixed status code.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::models::ErrorResponse;

/// Message sent to the caller for any store or upstream failure.
pub const GENERIC_FAILURE: &str = "Sorry, something went wrong.";

// == Explorer Error Enum ==
/// Unified error type for the explorer server.
#[derive(thiserror::Error, Debug)]
pub enum ExplorerError {
    /// Any failure reported by the relational store
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Provider answered but had no usable results
    #[error("no data from {provider}")]
    UpstreamEmpty { provider: &'static str },

    /// Network, status or decode failure while calling a provider
    #[error("{provider} request failed: {source}")]
    Upstream {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Inbound request is missing something the category needs
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ExplorerError {
    /// Wraps a reqwest failure with the name of the provider that caused it.
    pub fn upstream(provider: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Upstream { provider, source }
    }
}

/// A query string that does not deserialize is an invalid request; the
/// rejection text is kept for the log only.
impl From<QueryRejection> for ExplorerError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ExplorerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ExplorerError::InvalidRequest(msg) => {
                warn!(reason = %msg, "rejected request");
                StatusCode::BAD_REQUEST
            }
            other => {
                error!(error = %other, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::generic())).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the explorer server.
pub type Result<T> = std::result::Result<T, ExplorerError>;
