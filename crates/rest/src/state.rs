//! Application state for the search endpoint.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the search engine client built at startup and the server
//! configuration. Nothing in here is mutated after startup.

use std::sync::Arc;

use aisle_search::backend::SearchBackend;
use aisle_search::filter::FilterCodec;

use crate::config::ServerConfig;

/// Shared application state.
///
/// # Type Parameters
///
/// * `B` - The search engine client (must implement [`SearchBackend`])
///
/// # Example
///
/// ```rust,ignore
/// use aisle_rest::{AppState, ServerConfig};
/// use aisle_search::backend::{ElasticsearchClient, ElasticsearchConfig};
/// use std::sync::Arc;
///
/// let client = ElasticsearchClient::new(ElasticsearchConfig::default())?;
/// let state = AppState::new(Arc::new(client), ServerConfig::default());
/// ```
pub struct AppState<B> {
    /// The search engine client.
    backend: Arc<B>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since B is wrapped in Arc and doesn't need to be Clone
impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: Arc::clone(&self.config),
        }
    }
}

impl<B: SearchBackend> AppState<B> {
    /// Creates a new AppState with the given client and configuration.
    pub fn new(backend: Arc<B>, config: ServerConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the search engine client.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the product index searched by every request.
    pub fn index(&self) -> &str {
        &self.config.search_index
    }

    /// Returns a filter codec using the configured policy.
    pub fn filter_codec(&self) -> FilterCodec {
        FilterCodec::new(self.config.filter_policy)
    }
}
