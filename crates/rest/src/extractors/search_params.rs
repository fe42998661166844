//! Search parameters extractor.
//!
//! Reads the raw query string of a product search into an ordered
//! [`RequestParams`] bag. Repeated names such as `filter.name` are kept in
//! order, which a plain `HashMap` query would lose.

use aisle_search::filter::FILTER_NAME_PARAM;
use aisle_search::{RequestParams, SortSpec, UserQuery};
use axum::{
    extract::{FromRequestParts, RawQuery},
    http::request::Parts,
};
use std::convert::Infallible;

/// Name of the free-text query parameter.
pub const QUERY_PARAM: &str = "query";
/// Name of the sort field parameter.
pub const SORT_PARAM: &str = "sort";
/// Name of the sort direction parameter.
pub const SORT_DIR_PARAM: &str = "sortDir";

/// Axum extractor for product search parameters.
///
/// # Example
///
/// ```rust,ignore
/// use aisle_rest::extractors::SearchParams;
///
/// async fn search_handler(params: SearchParams) {
///     println!("{} sorted by {:?}", params.query(), params.sort());
/// }
/// ```
#[derive(Debug, Default)]
pub struct SearchParams {
    params: RequestParams,
}

impl SearchParams {
    /// Creates search params from an already parsed bag.
    pub fn from_params(params: RequestParams) -> Self {
        Self { params }
    }

    /// Parses a raw query string (without the leading `?`).
    pub fn parse(raw: &str) -> Self {
        Self::from_params(RequestParams::parse(raw))
    }

    /// Returns the normalised user query.
    pub fn query(&self) -> UserQuery {
        UserQuery::new(self.params.get(QUERY_PARAM))
    }

    /// Returns the requested sort, defaulting to `_score desc`.
    pub fn sort(&self) -> SortSpec {
        SortSpec::from_params(self.params.get(SORT_PARAM), self.params.get(SORT_DIR_PARAM))
    }

    /// Returns true if at least one `filter.name` is present.
    pub fn has_filters(&self) -> bool {
        self.params.contains(FILTER_NAME_PARAM)
    }

    /// Returns every parameter, in request order.
    pub fn raw_params(&self) -> &RequestParams {
        &self.params
    }
}

impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RawQuery(raw) = RawQuery::from_request_parts(parts, state).await?;
        Ok(raw.as_deref().map(SearchParams::parse).unwrap_or_default())
    }
}
