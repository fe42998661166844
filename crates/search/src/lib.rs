//! # aisle-search - Product search query construction
//!
//! This crate holds the request-independent core of the Aisle product search:
//! it turns loosely-typed search input (free text, sort order and the facet
//! filters a shopper clicked) into a search-engine query document, and keeps
//! the "currently applied filters" state encodable in plain links so facet
//! navigation composes across page loads without a server-side session.
//!
//! ## Architecture
//!
//! - [`params`] - Ordered multi-valued request parameters
//! - [`filter`] - Facet filter parsing, applied-filter encoding and the filter codec
//! - [`query`] - Query document builder (scoring, filters, aggregations, sort)
//! - [`backend`] - Search engine client trait and the Elasticsearch-compatible client
//! - [`response`] - Typed view over the engine's search response
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust
//! use aisle_search::filter::{FilterCodec, FilterPolicy};
//! use aisle_search::params::RequestParams;
//! use aisle_search::query::{SortSpec, UserQuery, build};
//!
//! let params = RequestParams::parse(
//!     "query=laptop&filter.name=department&department.type=terms&department.key=COMPUTERS",
//! );
//! let names = params.get_all("filter.name");
//! let decoded = FilterCodec::new(FilterPolicy::Lenient)
//!     .decode(&names, &params)
//!     .unwrap();
//!
//! let doc = build(
//!     &UserQuery::new(params.get("query")),
//!     decoded.clauses,
//!     &SortSpec::default(),
//! );
//! assert_eq!(doc.size(), 10);
//! assert_eq!(doc.filters().len(), 1);
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod filter;
pub mod params;
pub mod query;
pub mod response;

pub use error::{FilterError, SearchError, SearchResult};
pub use filter::{
    AppliedFilters, DecodedFilters, DisplayFilter, FilterCodec, FilterKind, FilterPolicy,
    FilterSpec,
};
pub use params::RequestParams;
pub use query::{QueryClause, SearchRequestDoc, SortDirection, SortSpec, UserQuery};

/// Name of the product index searched by default.
pub const DEFAULT_PRODUCT_INDEX: &str = "bbuy_products";
