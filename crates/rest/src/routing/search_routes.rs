//! Search route configuration.

use aisle_search::backend::SearchBackend;
use axum::{Router, routing::get};

use crate::handlers;
use crate::render::SEARCH_PATH;
use crate::state::AppState;

/// Creates all routes.
///
/// # Routes
///
/// - `GET /search/query` - Search with facet filters
/// - `POST /search/query` - Search from the search form
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe (pings the search engine)
pub fn create_routes<B>(state: AppState<B>) -> Router
where
    B: SearchBackend + 'static,
{
    Router::new()
        .route(
            SEARCH_PATH,
            get(handlers::search_get_handler::<B>)
                .post(handlers::search_post_handler::<B>),
        )
        .route("/health", get(handlers::health_handler::<B>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<B>))
        .with_state(state)
}
