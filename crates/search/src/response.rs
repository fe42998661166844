//! Typed view over a search response.
//!
//! The raw response is handed to rendering unchanged; this view only pulls
//! out what the result page needs. Any missing section reads as empty.

use serde::Serialize;
use serde_json::Value;

use crate::query::aggregations::{DEPARTMENT_AGG, MISSING_IMAGES_AGG, PRICE_AGG};

/// A single ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductHit {
    /// Document ID.
    pub id: String,
    /// Relevance score; absent when sorting on a field.
    pub score: Option<f64>,
    /// The stored product document.
    pub source: Value,
}

/// A bucket of the price range aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBucket {
    /// Bucket key, e.g. `$$`.
    pub key: String,
    /// Inclusive lower bound.
    pub from: Option<f64>,
    /// Exclusive upper bound.
    pub to: Option<f64>,
    /// Number of matching products.
    pub doc_count: u64,
}

/// A bucket of a terms aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermBucket {
    /// The term.
    pub key: String,
    /// Number of matching products.
    pub doc_count: u64,
}

/// The parts of a search response a result page needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResponseView {
    /// Total number of matching products.
    pub total: u64,
    /// Ranked hits of the current page.
    pub hits: Vec<ProductHit>,
    /// Price band buckets.
    pub price_buckets: Vec<RangeBucket>,
    /// Department buckets, most populated first.
    pub department_buckets: Vec<TermBucket>,
    /// Number of matching products without an image.
    pub missing_images: u64,
}

impl SearchResponseView {
    /// Extracts the view from a raw response document.
    pub fn from_value(response: &Value) -> Self {
        let aggs = &response["aggregations"];

        Self {
            total: parse_total(&response["hits"]["total"]),
            hits: parse_hits(&response["hits"]["hits"]),
            price_buckets: buckets(&aggs[PRICE_AGG])
                .iter()
                .map(|b| RangeBucket {
                    key: bucket_key(b),
                    from: b["from"].as_f64(),
                    to: b["to"].as_f64(),
                    doc_count: b["doc_count"].as_u64().unwrap_or_default(),
                })
                .collect(),
            department_buckets: buckets(&aggs[DEPARTMENT_AGG])
                .iter()
                .map(|b| TermBucket {
                    key: bucket_key(b),
                    doc_count: b["doc_count"].as_u64().unwrap_or_default(),
                })
                .collect(),
            missing_images: aggs[MISSING_IMAGES_AGG]["doc_count"]
                .as_u64()
                .unwrap_or_default(),
        }
    }
}

/// Reads `hits.total`, either `{"value": n}` or a bare number.
fn parse_total(total: &Value) -> u64 {
    total
        .get("value")
        .and_then(Value::as_u64)
        .or_else(|| total.as_u64())
        .unwrap_or_default()
}

fn parse_hits(hits: &Value) -> Vec<ProductHit> {
    hits.as_array()
        .map(|hits| {
            hits.iter()
                .map(|hit| ProductHit {
                    id: hit["_id"].as_str().unwrap_or_default().to_string(),
                    score: hit["_score"].as_f64(),
                    source: hit.get("_source").cloned().unwrap_or(Value::Null),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn buckets(agg: &Value) -> &[Value] {
    agg["buckets"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn bucket_key(bucket: &Value) -> String {
    match &bucket["key"] {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
