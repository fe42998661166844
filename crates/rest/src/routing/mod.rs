//! Route configuration for the product search endpoint.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod search_routes;

pub use search_routes::create_routes;
