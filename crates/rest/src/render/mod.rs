//! Result rendering.
//!
//! A search ends in a [`ResultBag`]: the echoed request, the filter labels,
//! the applied-filter string for links, the facet links and the raw engine
//! response. The HTTP layer serialises it as JSON.

pub mod facets;

pub use facets::{FacetGroup, FacetLink, SEARCH_PATH, build_facets};

use aisle_search::response::{ProductHit, SearchResponseView};
use aisle_search::{
    AppliedFilters, DecodedFilters, DisplayFilter, FilterError, SortDirection, SortSpec,
    UserQuery,
};
use serde::Serialize;
use serde_json::Value;

/// A filter dropped by the lenient policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedFilter {
    /// Filter name.
    pub name: String,
    /// Why it was dropped.
    pub reason: String,
}

impl From<&FilterError> for RejectedFilter {
    fn from(err: &FilterError) -> Self {
        Self {
            name: err.filter_name().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Everything a result page needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBag {
    /// The user query as echoed back (`*` for match-all).
    pub query: String,
    /// Sort field.
    pub sort: String,
    /// Sort direction.
    pub sort_dir: SortDirection,
    /// Labels of the applied filters, in order.
    pub display_filters: Vec<DisplayFilter>,
    /// Applied filters as a `&k=v` fragment.
    pub applied_filters: AppliedFilters,
    /// Filters dropped while decoding.
    pub rejected_filters: Vec<RejectedFilter>,
    /// Total number of matches.
    pub total: u64,
    /// Hits of the current page.
    pub hits: Vec<ProductHit>,
    /// Facet links.
    pub facets: Vec<FacetGroup>,
    /// Matching products without an image.
    pub missing_images: u64,
    /// The engine response, untouched.
    pub search_response: Value,
}

impl ResultBag {
    /// Assembles the bag for a finished search.
    pub fn new(
        query: &UserQuery,
        sort: &SortSpec,
        filters: DecodedFilters,
        search_response: Value,
    ) -> Self {
        let view = SearchResponseView::from_value(&search_response);
        let facets = build_facets(&view, query, sort, &filters.applied);

        Self {
            query: query.as_str().to_string(),
            sort: sort.field.clone(),
            sort_dir: sort.direction,
            rejected_filters: filters.rejected.iter().map(RejectedFilter::from).collect(),
            display_filters: filters.display_filters,
            applied_filters: filters.applied,
            total: view.total,
            hits: view.hits,
            facets,
            missing_images: view.missing_images,
            search_response,
        }
    }
}
