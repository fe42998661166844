//! # aisle-rest - HTTP layer for faceted product search
//!
//! This crate exposes the filter codec and query builder of [`aisle_search`]
//! over HTTP. A search request carries the user's text query, a sort and any
//! number of facet filters; the response is a JSON result bag with the hits,
//! the applied-filter labels and ready-made facet links.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aisle_rest::{create_app_with_config, ServerConfig};
//! use aisle_search::backend::{ElasticsearchClient, ElasticsearchConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ElasticsearchClient::new(ElasticsearchConfig::default())?;
//!     let config = ServerConfig::default();
//!
//!     let app = create_app_with_config(client, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | HTTP Method | Description |
//! |----------|-------------|-------------|
//! | `/search/query` | GET | Search; query string carries `query`, `sort`, `sortDir` and filters |
//! | `/search/query` | POST | Search from a form body (`query`, `sort`, `sortDir`) |
//! | `/health` | GET | Health check |
//! | `/_liveness` | GET | Liveness probe |
//! | `/_readiness` | GET | Readiness probe, pings the search engine |
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": {"code": .., "message": ..}}`:
//!
//! | HTTP Status | Code | Description |
//! |-------------|------|-------------|
//! | 400 | invalid-filter | Undecodable filter under the strict policy |
//! | 502 | search-failed | The engine rejected the query or returned an unreadable response |
//! | 503 | unavailable | The engine cannot be reached |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their HTTP mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (search client, configuration)
//! - [`extractors`] - Query-string extraction
//! - [`handlers`] - HTTP request handlers
//! - [`render`] - Result bag and facet links
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod render;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use render::ResultBag;
pub use state::AppState;

use std::sync::Arc;

use aisle_search::backend::SearchBackend;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<B>(backend: B) -> Router
where
    B: SearchBackend + 'static,
{
    create_app_with_config(backend, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `backend` - The search engine client, shared by every request
/// * `config` - Server configuration
pub fn create_app_with_config<B>(backend: B, config: ServerConfig) -> Router
where
    B: SearchBackend + 'static,
{
    info!(
        backend = backend.backend_name(),
        index = %config.search_index,
        filter_policy = %config.filter_policy,
        "Creating search server"
    );

    let state = AppState::new(Arc::new(backend), config.clone());

    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = split_list(&config.cors_origins)
            .filter_map(|s| s.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = split_list(&config.cors_methods)
            .filter_map(|s| s.parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = split_list(&config.cors_headers)
            .filter_map(|s| s.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "aisle={level},aisle_rest={level},aisle_search={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
