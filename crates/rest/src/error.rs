//! Error types for the search endpoint.
//!
//! Core errors are mapped to HTTP status codes and returned as a small JSON
//! error document:
//!
//! | Core Error | HTTP Status | Code |
//! |------------|-------------|------|
//! | FilterError::UnrecognizedFilterKind (strict policy) | 400 | invalid-filter |
//! | SearchError::ConnectionFailed | 503 | unavailable |
//! | SearchError::Unavailable | 503 | unavailable |
//! | SearchError::QueryFailed | 502 | search-failed |
//! | SearchError::InvalidResponse | 502 | search-failed |

use aisle_search::{FilterError, SearchError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// The primary error type for HTTP operations.
#[derive(Debug)]
pub enum RestError {
    /// A facet filter could not be decoded under the strict policy (HTTP 400).
    InvalidFilter {
        /// The filter name.
        filter: String,
        /// Error message.
        message: String,
    },

    /// The search engine cannot be reached (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// The search engine rejected the query or answered garbage (HTTP 502).
    BadGateway {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::InvalidFilter { filter, message } => {
                write!(f, "Invalid filter '{}': {}", filter, message)
            }
            RestError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
            RestError::BadGateway { message } => {
                write!(f, "Bad gateway: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidFilter { .. } => StatusCode::BAD_REQUEST,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Returns the machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::InvalidFilter { .. } => "invalid-filter",
            RestError::ServiceUnavailable { .. } => "unavailable",
            RestError::BadGateway { .. } => "search-failed",
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        let body = create_error_body(self.code(), &self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Creates the JSON error document.
fn create_error_body(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}

// Implement conversions from core errors

impl From<FilterError> for RestError {
    fn from(err: FilterError) -> Self {
        RestError::InvalidFilter {
            filter: err.filter_name().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<SearchError> for RestError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::ConnectionFailed { .. } | SearchError::Unavailable { .. } => {
                RestError::ServiceUnavailable {
                    message: err.to_string(),
                }
            }
            SearchError::QueryFailed { .. } | SearchError::InvalidResponse { .. } => {
                RestError::BadGateway {
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Result type alias for HTTP operations.
pub type RestResult<T> = Result<T, RestError>;
