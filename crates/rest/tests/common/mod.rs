//! Common test utilities for the search endpoint.
//!
//! - [`RecordingBackend`] - in-memory search engine that records every request
//! - [`create_test_server`] - test server wired to a recording backend

#![allow(dead_code)]

use std::sync::Arc;

use aisle_rest::{AppState, ServerConfig};
use aisle_search::backend::SearchBackend;
use aisle_search::error::{SearchError, SearchResult};
use aisle_search::query::SearchRequestDoc;
use async_trait::async_trait;
use axum_test::TestServer;
use parking_lot::Mutex;
use serde_json::{Value, json};

/// A search request as seen by the backend.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// Index the request targeted.
    pub index: String,
    /// The request body.
    pub body: Value,
}

/// How the backend answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendMode {
    /// Return the canned response.
    #[default]
    Healthy,
    /// Fail as if the engine could not be reached.
    Unavailable,
    /// Fail as if the engine rejected the query.
    QueryFailed,
}

/// In-memory search engine.
#[derive(Debug)]
pub struct RecordingBackend {
    response: Value,
    mode: Mutex<BackendMode>,
    requests: Mutex<Vec<RecordedSearch>>,
}

impl RecordingBackend {
    /// Creates a backend answering with [`sample_response`].
    pub fn new() -> Self {
        Self::with_response(sample_response())
    }

    /// Creates a backend answering with `response`.
    pub fn with_response(response: Value) -> Self {
        Self {
            response,
            mode: Mutex::new(BackendMode::Healthy),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Switches how subsequent calls are answered.
    pub fn set_mode(&self, mode: BackendMode) {
        *self.mode.lock() = mode;
    }

    /// Returns every recorded search, oldest first.
    pub fn requests(&self) -> Vec<RecordedSearch> {
        self.requests.lock().clone()
    }

    /// Returns the last recorded search.
    pub fn last_request(&self) -> RecordedSearch {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no search was recorded")
    }

    fn check_mode(&self) -> SearchResult<()> {
        match *self.mode.lock() {
            BackendMode::Healthy => Ok(()),
            BackendMode::Unavailable => Err(SearchError::Unavailable {
                message: "connection refused".to_string(),
            }),
            BackendMode::QueryFailed => Err(SearchError::QueryFailed {
                status: 400,
                body: r#"{"error":{"type":"parsing_exception"}}"#.to_string(),
            }),
        }
    }
}

#[async_trait]
impl SearchBackend for RecordingBackend {
    fn backend_name(&self) -> &'static str {
        "recording"
    }

    async fn search(&self, index: &str, request: &SearchRequestDoc) -> SearchResult<Value> {
        self.requests.lock().push(RecordedSearch {
            index: index.to_string(),
            body: request.body().clone(),
        });
        self.check_mode()?;
        Ok(self.response.clone())
    }

    async fn ping(&self) -> SearchResult<()> {
        self.check_mode()
    }
}

/// A response with two hits and all three aggregations.
pub fn sample_response() -> Value {
    json!({
        "took": 4,
        "timed_out": false,
        "hits": {
            "total": { "value": 2, "relation": "eq" },
            "hits": [
                {
                    "_id": "1945531",
                    "_score": 9.1,
                    "_source": {
                        "name": "Apple iPad 2 16GB",
                        "regularPrice": 499.99,
                        "department": "COMPUTERS"
                    }
                },
                {
                    "_id": "2339322",
                    "_score": 4.3,
                    "_source": {
                        "name": "iPad Smart Cover",
                        "regularPrice": 39.99,
                        "department": "ACCESSORIES"
                    }
                }
            ]
        },
        "aggregations": {
            "regularPrice": {
                "buckets": [
                    { "key": "$", "to": 100.0, "doc_count": 1 },
                    { "key": "$$", "from": 100.0, "to": 200.0, "doc_count": 0 },
                    { "key": "$$$", "from": 200.0, "to": 300.0, "doc_count": 0 },
                    { "key": "$$$$", "from": 300.0, "to": 400.0, "doc_count": 0 },
                    { "key": "$$$$$", "from": 400.0, "doc_count": 1 }
                ]
            },
            "missing_images": { "doc_count": 0 },
            "department": {
                "buckets": [
                    { "key": "ACCESSORIES", "doc_count": 1 },
                    { "key": "COMPUTERS", "doc_count": 1 }
                ]
            }
        }
    })
}

/// Creates a test server over a fresh recording backend.
pub fn create_test_server() -> (TestServer, Arc<RecordingBackend>) {
    create_test_server_with_config(ServerConfig::for_testing())
}

/// Creates a test server over a fresh recording backend with `config`.
pub fn create_test_server_with_config(
    config: ServerConfig,
) -> (TestServer, Arc<RecordingBackend>) {
    let backend = Arc::new(RecordingBackend::new());
    let state = AppState::new(Arc::clone(&backend), config);
    let app = aisle_rest::routing::create_routes(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, backend)
}
