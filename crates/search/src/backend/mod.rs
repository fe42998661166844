//! Search engine collaborator.
//!
//! The query core never talks to the network itself. Handlers hold a single
//! [`SearchBackend`] built at process startup and hand it the finished
//! [`SearchRequestDoc`]; whatever the engine returns is passed on untouched.
//! There is no retry or backoff at this layer.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SearchResult;
use crate::query::SearchRequestDoc;

#[cfg(feature = "elasticsearch")]
mod elasticsearch;

#[cfg(feature = "elasticsearch")]
pub use self::elasticsearch::{ElasticsearchAuth, ElasticsearchClient, ElasticsearchConfig};

/// A search engine that executes query documents against an index.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Returns a short name for logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Executes `request` against `index` and returns the raw response document.
    async fn search(&self, index: &str, request: &SearchRequestDoc) -> SearchResult<Value>;

    /// Checks that the engine is reachable.
    async fn ping(&self) -> SearchResult<()>;
}
