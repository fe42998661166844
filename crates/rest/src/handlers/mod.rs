//! HTTP request handlers.
//!
//! - [`search`] - Product search (GET with filters, POST from the search form)
//! - [`health`] - Health, liveness and readiness endpoints

pub mod health;
pub mod search;

// Re-export handlers for convenience
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use search::{search_get_handler, search_post_handler};
