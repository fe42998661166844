//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and load
//! balancers.

use aisle_search::backend::SearchBackend;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Reports the process as healthy without contacting the search engine.
///
/// # HTTP Request
///
/// `GET [base]/health`
pub async fn health_handler<B>(State(state): State<AppState<B>>) -> Response
where
    B: SearchBackend + 'static,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.backend().backend_name(),
        "index": state.index(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response)).into_response()
}

/// Handler for a liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for a readiness probe.
///
/// Pings the search engine.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - The search engine answered
/// - `503 Service Unavailable` - The search engine is unreachable
pub async fn readiness_handler<B>(State(state): State<AppState<B>>) -> Response
where
    B: SearchBackend + 'static,
{
    debug!("Processing readiness check request");

    let backend_name = state.backend().backend_name();

    match state.backend().ping().await {
        Ok(()) => {
            let response = serde_json::json!({
                "status": "ready",
                "backend": backend_name,
                "checks": {
                    "search": "ok"
                }
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "Search engine not ready");
            let response = serde_json::json!({
                "status": "not ready",
                "backend": backend_name,
                "checks": {
                    "search": err.to_string()
                }
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
        }
    }
}
