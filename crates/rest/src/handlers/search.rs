//! Product search handlers.
//!
//! - `GET [base]/search/query` - search from the query string, with facet filters
//! - `POST [base]/search/query` - search from the form body, no filters
//!
//! Both methods read their parameters with the same rules: a repeated
//! `query`, `sort` or `sortDir` resolves to its first value.

use aisle_search::backend::SearchBackend;
use aisle_search::query;
use aisle_search::{DecodedFilters, SortSpec, UserQuery};
use axum::{Json, extract::State};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::SearchParams;
use crate::render::ResultBag;
use crate::state::AppState;

/// Handler for the GET search.
///
/// Filters are only decoded when the request carries at least one
/// `filter.name`. Under the strict policy an undecodable filter fails the
/// request with `400 Bad Request`.
pub async fn search_get_handler<B>(
    State(state): State<AppState<B>>,
    params: SearchParams,
) -> RestResult<Json<ResultBag>>
where
    B: SearchBackend + 'static,
{
    let filters = if params.has_filters() {
        state.filter_codec().decode_request(params.raw_params())?
    } else {
        DecodedFilters::default()
    };

    execute_search(&state, params.query(), params.sort(), filters).await
}

/// Handler for the POST search.
///
/// The body is form-urlencoded (`query`, `sort`, `sortDir`) and is parsed
/// like a query string. Filter parameters in the body are ignored.
pub async fn search_post_handler<B>(
    State(state): State<AppState<B>>,
    body: String,
) -> RestResult<Json<ResultBag>>
where
    B: SearchBackend + 'static,
{
    let params = SearchParams::parse(&body);
    let filters = DecodedFilters::default();

    execute_search(&state, params.query(), params.sort(), filters).await
}

async fn execute_search<B: SearchBackend>(
    state: &AppState<B>,
    user_query: UserQuery,
    sort: SortSpec,
    mut filters: DecodedFilters,
) -> RestResult<Json<ResultBag>> {
    let request = query::build(&user_query, std::mem::take(&mut filters.clauses), &sort);

    debug!(
        index = %state.index(),
        query = %user_query,
        sort = %sort.field,
        sort_dir = %sort.direction,
        filters = request.filters().len(),
        backend = state.backend().backend_name(),
        "Processing product search"
    );

    let response = state.backend().search(state.index(), &request).await?;

    Ok(Json(ResultBag::new(&user_query, &sort, filters, response)))
}
