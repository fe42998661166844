//! Error types for the search core.
//!
//! Filter decoding and search execution fail in unrelated ways, so each has
//! its own enum. Absent optional values (an empty `from`, a missing
//! `displayName`) are never errors; they decode to their documented defaults.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// Errors raised while decoding facet filters from request parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The `<name>.type` parameter is missing or is neither `range` nor `terms`.
    #[error("unrecognized filter kind for '{name}': {}", kind.as_deref().unwrap_or("<missing>"))]
    UnrecognizedFilterKind { name: String, kind: Option<String> },
}

impl FilterError {
    /// Returns the name of the filter that failed to decode.
    pub fn filter_name(&self) -> &str {
        match self {
            FilterError::UnrecognizedFilterKind { name, .. } => name,
        }
    }
}

/// Errors raised by the search engine collaborator.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The client could not be constructed (bad node URL, TLS setup).
    #[error("failed to connect to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// The transport failed before a response was received.
    #[error("search engine unavailable: {message}")]
    Unavailable { message: String },

    /// The engine answered with a non-success status.
    #[error("search failed with status {status}: {body}")]
    QueryFailed { status: u16, body: String },

    /// The engine answered with a body that is not a search response.
    #[error("invalid search response: {message}")]
    InvalidResponse { message: String },
}

/// Result type alias for search engine calls.
pub type SearchResult<T> = Result<T, SearchError>;
