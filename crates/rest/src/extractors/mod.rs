//! Axum extractors for product search requests.
//!
//! - [`SearchParams`] - Extract the ordered query-string parameters

mod search_params;

pub use search_params::{QUERY_PARAM, SORT_DIR_PARAM, SORT_PARAM, SearchParams};
