//! Product query document builder.
//!
//! Translates the normalised user input into query DSL JSON: a match-all
//! query when there is no text, otherwise a scored multi-field match whose
//! relevance is multiplied by the products' sales-rank popularity.

use serde::Serialize;
use serde_json::{Value, json};

use super::aggregations::aggregations;
use super::clause::QueryClause;
use super::sort::{SortSpec, UserQuery};

/// Number of hits requested per search.
pub const PAGE_SIZE: usize = 10;

/// Text fields searched by the multi-match, with static boosts.
///
/// Title matches dominate; department matches are only a tie-breaker.
pub const WEIGHTED_FIELDS: [&str; 4] = [
    "name^100",
    "shortDescription^20",
    "longDescription^10",
    "department",
];

/// Boost of the near-exact phrase match on the product name.
pub const PHRASE_BOOST: u32 = 200;

/// Token slop tolerated by the name phrase match.
pub const PHRASE_SLOP: u32 = 1;

/// Sales rank fields combined into the popularity function, longest term first.
pub const SALES_RANK_FIELDS: [&str; 3] = [
    "salesRankLongTerm",
    "salesRankMediumTerm",
    "salesRankShortTerm",
];

/// Rank substituted for products without a sales rank.
///
/// Its reciprocal is close to zero, so unranked products get no popularity lift.
pub const MISSING_SALES_RANK: u64 = 1_000_000_000;

/// A complete query document ready to be sent.
///
/// Built once per request and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchRequestDoc {
    body: Value,
}

impl SearchRequestDoc {
    /// Returns the document JSON.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the document, returning its JSON.
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Returns the requested page size.
    pub fn size(&self) -> usize {
        self.body["size"].as_u64().unwrap_or_default() as usize
    }

    /// Returns true when the document is the unscored match-all shape.
    pub fn is_match_all(&self) -> bool {
        self.body["query"]["bool"]["must"]
            .get("match_all")
            .is_some()
    }

    /// Returns the filter clauses attached to the query, whatever its shape.
    pub fn filters(&self) -> &[Value] {
        let bool_query = if self.is_match_all() {
            &self.body["query"]["bool"]
        } else {
            &self.body["query"]["function_score"]["query"]["bool"]
        };
        bool_query["filter"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the `aggs` block.
    pub fn aggregations(&self) -> &Value {
        &self.body["aggs"]
    }

    /// Returns the sort array.
    pub fn sort(&self) -> &Value {
        &self.body["sort"]
    }
}

/// Builds product query documents.
pub struct QueryBuilder<'a> {
    user_query: &'a UserQuery,
    sort: &'a SortSpec,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a new query builder.
    pub fn new(user_query: &'a UserQuery, sort: &'a SortSpec) -> Self {
        Self { user_query, sort }
    }

    /// Builds the complete query document with the given filter clauses.
    pub fn build(&self, filters: Vec<QueryClause>) -> SearchRequestDoc {
        let filters: Vec<Value> = filters.into_iter().map(QueryClause::into_value).collect();

        let query = match self.user_query {
            UserQuery::MatchAll => Self::match_all_query(filters),
            UserQuery::Text(text) => Self::scored_query(text, filters),
        };

        let body = json!({
            "size": PAGE_SIZE,
            "query": query,
            "aggs": aggregations(),
            "sort": self.sort.to_value(),
        });

        SearchRequestDoc { body }
    }

    /// Builds the unscored match-all query with the filters attached.
    fn match_all_query(filters: Vec<Value>) -> Value {
        json!({
            "bool": {
                "must": { "match_all": {} },
                "filter": filters
            }
        })
    }

    /// Builds the scored full-text query.
    fn scored_query(text: &str, filters: Vec<Value>) -> Value {
        json!({
            "function_score": {
                "query": {
                    "bool": {
                        "filter": filters,
                        "must": {
                            "multi_match": {
                                "fields": WEIGHTED_FIELDS,
                                "query": text
                            }
                        },
                        "should": {
                            "match_phrase": {
                                "name": {
                                    "query": text,
                                    "analyzer": "standard",
                                    "boost": PHRASE_BOOST,
                                    "slop": PHRASE_SLOP
                                }
                            }
                        }
                    }
                },
                "boost_mode": "multiply",
                "score_mode": "avg",
                "functions": Self::ranking_functions()
            }
        })
    }

    /// One reciprocal field-value factor per sales rank horizon.
    fn ranking_functions() -> Vec<Value> {
        SALES_RANK_FIELDS
            .iter()
            .map(|field| {
                json!({
                    "field_value_factor": {
                        "field": field,
                        "modifier": "reciprocal",
                        "missing": MISSING_SALES_RANK
                    }
                })
            })
            .collect()
    }
}

/// Builds a query document; see [`QueryBuilder`].
pub fn build(
    user_query: &UserQuery,
    filters: Vec<QueryClause>,
    sort: &SortSpec,
) -> SearchRequestDoc {
    QueryBuilder::new(user_query, sort).build(filters)
}
