//! The fixed facet aggregations attached to every product query.

use serde_json::{Value, json};

/// Aggregation (and facet filter) name for the price bands.
pub const PRICE_AGG: &str = "regularPrice";

/// Aggregation name for products without an image.
pub const MISSING_IMAGES_AGG: &str = "missing_images";

/// Aggregation (and facet filter) name for departments.
pub const DEPARTMENT_AGG: &str = "department";

/// One bucket of the price range aggregation.
///
/// `from` is inclusive and `to` exclusive, matching range aggregation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    /// Bucket key shown to the user.
    pub key: &'static str,
    /// Lower bound, if any.
    pub from: Option<u32>,
    /// Upper bound, if any.
    pub to: Option<u32>,
}

/// Price bands in ascending order.
pub const PRICE_BANDS: [PriceBand; 5] = [
    PriceBand {
        key: "$",
        from: None,
        to: Some(100),
    },
    PriceBand {
        key: "$$",
        from: Some(100),
        to: Some(200),
    },
    PriceBand {
        key: "$$$",
        from: Some(200),
        to: Some(300),
    },
    PriceBand {
        key: "$$$$",
        from: Some(300),
        to: Some(400),
    },
    PriceBand {
        key: "$$$$$",
        from: Some(400),
        to: None,
    },
];

impl PriceBand {
    fn to_value(self) -> Value {
        let mut range = json!({ "key": self.key });
        if let Some(from) = self.from {
            range["from"] = json!(from);
        }
        if let Some(to) = self.to {
            range["to"] = json!(to);
        }
        range
    }
}

/// Builds the `aggs` block: price bands, missing images and departments.
pub fn aggregations() -> Value {
    let ranges: Vec<Value> = PRICE_BANDS.iter().map(|band| band.to_value()).collect();

    json!({
        PRICE_AGG: {
            "range": {
                "field": "regularPrice",
                "ranges": ranges
            }
        },
        MISSING_IMAGES_AGG: {
            "missing": { "field": "image.keyword" }
        },
        DEPARTMENT_AGG: {
            "terms": {
                "field": "department.keyword",
                "order": { "_count": "desc" }
            }
        }
    })
}
