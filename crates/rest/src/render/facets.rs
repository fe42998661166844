//! Facet links for the result page.
//!
//! Every bucket of the price and department aggregations becomes a link that
//! reproduces the current search and adds one more filter. The new filter is
//! written before the applied-filter string; since the codec decodes a name at
//! its first occurrence, clicking a sibling bucket replaces the previous
//! selection for that facet.

use aisle_search::query::aggregations::{DEPARTMENT_AGG, PRICE_AGG};
use aisle_search::response::SearchResponseView;
use aisle_search::{AppliedFilters, FilterSpec, SortSpec, UserQuery};
use serde::Serialize;
use url::form_urlencoded;

use crate::extractors::{QUERY_PARAM, SORT_DIR_PARAM, SORT_PARAM};

/// Path the facet links point at.
pub const SEARCH_PATH: &str = "/search/query";

const PRICE_DISPLAY_NAME: &str = "Price";
const DEPARTMENT_DISPLAY_NAME: &str = "Department";

/// A clickable facet bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetLink {
    /// Bucket label.
    pub label: String,
    /// Number of products in the bucket.
    pub count: u64,
    /// Link that applies this bucket on top of the current filters.
    pub href: String,
}

/// The links of one aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetGroup {
    /// Filter name, also the aggregation name.
    pub name: String,
    /// Label of the group.
    pub display_name: String,
    /// One link per bucket, in response order.
    pub links: Vec<FacetLink>,
}

/// Builds the price and department facet groups.
pub fn build_facets(
    view: &SearchResponseView,
    query: &UserQuery,
    sort: &SortSpec,
    applied: &AppliedFilters,
) -> Vec<FacetGroup> {
    let prefix = search_prefix(query, sort);
    let suffix = applied.to_query_string();
    let link = |label: &str, count: u64, spec: FilterSpec| FacetLink {
        label: label.to_string(),
        count,
        href: format!(
            "{}{}{}",
            prefix,
            AppliedFilters::from_specs([&spec]).to_query_string(),
            suffix
        ),
    };

    let price = view
        .price_buckets
        .iter()
        .map(|bucket| {
            let from = bucket.from.map(format_bound);
            let to = bucket.to.map(format_bound);
            let spec = FilterSpec::range(PRICE_AGG, &bucket.key, from.as_deref(), to.as_deref())
                .with_display_name(PRICE_DISPLAY_NAME);
            link(&bucket.key, bucket.doc_count, spec)
        })
        .collect();

    let department = view
        .department_buckets
        .iter()
        .map(|bucket| {
            let spec = FilterSpec::terms(DEPARTMENT_AGG, &bucket.key)
                .with_display_name(DEPARTMENT_DISPLAY_NAME);
            link(&bucket.key, bucket.doc_count, spec)
        })
        .collect();

    vec![
        FacetGroup {
            name: PRICE_AGG.to_string(),
            display_name: PRICE_DISPLAY_NAME.to_string(),
            links: price,
        },
        FacetGroup {
            name: DEPARTMENT_AGG.to_string(),
            display_name: DEPARTMENT_DISPLAY_NAME.to_string(),
            links: department,
        },
    ]
}

/// `/search/query?query=..&sort=..&sortDir=..`
fn search_prefix(query: &UserQuery, sort: &SortSpec) -> String {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair(QUERY_PARAM, query.as_str())
        .append_pair(SORT_PARAM, &sort.field)
        .append_pair(SORT_DIR_PARAM, sort.direction.as_str())
        .finish();
    format!("{}?{}", SEARCH_PATH, encoded)
}

// f64 Display already drops a zero fraction (100.0 -> "100").
fn format_bound(value: f64) -> String {
    value.to_string()
}
