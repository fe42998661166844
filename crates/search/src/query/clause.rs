//! Engine-native filter fragments.

use serde::Serialize;
use serde_json::{Map, Value, json};

/// Suffix of the non-analyzed sub-field used for exact term matches.
pub const KEYWORD_SUFFIX: &str = ".keyword";

/// A single filter fragment of the query DSL, e.g. a range or term clause.
///
/// Clauses are attached to the `filter` list of the outgoing query, so they
/// decide inclusion only and never contribute to the relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryClause(Value);

impl QueryClause {
    /// Builds an inclusive range clause on `field`.
    ///
    /// A `None` bound is left out; with both bounds absent the clause is an
    /// unbounded range.
    pub fn range(field: &str, gte: Option<&str>, lte: Option<&str>) -> Self {
        let mut bounds = Map::new();
        if let Some(from) = gte {
            bounds.insert("gte".to_string(), json!(from));
        }
        if let Some(to) = lte {
            bounds.insert("lte".to_string(), json!(to));
        }
        Self(json!({ "range": { field: Value::Object(bounds) } }))
    }

    /// Builds an exact-match clause on the keyword sub-field of `field`.
    pub fn term(field: &str, value: &str) -> Self {
        let keyword_field = format!("{}{}", field, KEYWORD_SUFFIX);
        Self(json!({ "term": { keyword_field: value } }))
    }

    /// Returns the clause as JSON.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the clause, returning its JSON.
    pub fn into_value(self) -> Value {
        self.0
    }
}
