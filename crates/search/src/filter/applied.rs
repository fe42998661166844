//! Applied-filter state encoding.
//!
//! The filters in force are carried from page to page in plain links: every
//! facet link and sort link appends this fragment, and the next request
//! decodes it back through the filter codec. The fragment is a sequence of
//! `&name=value` pairs so it can be appended to any query string.

use std::fmt;

use serde::{Serialize, Serializer};
use url::form_urlencoded;

use crate::params::RequestParams;

use super::spec::{
    DISPLAY_NAME_ATTR, FILTER_NAME_PARAM, FROM_ATTR, FilterKind, FilterPayload, FilterSpec,
    KEY_ATTR, TO_ATTR, TYPE_ATTR, param_key,
};

/// Order-preserving encoding of the active filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedFilters {
    pairs: Vec<(String, String)>,
}

impl AppliedFilters {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes a list of filters.
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a FilterSpec>) -> Self {
        let mut applied = Self::new();
        for spec in specs {
            applied.push_header(&spec.name, spec.kind(), &spec.display_name);
            applied.push_payload(spec);
        }
        applied
    }

    /// Appends the `filter.name`, `<name>.type` and `<name>.displayName` group.
    pub fn push_header(&mut self, name: &str, kind: FilterKind, display_name: &str) {
        self.push(FILTER_NAME_PARAM.to_string(), name);
        self.push(param_key(name, TYPE_ATTR), kind.as_str());
        self.push(param_key(name, DISPLAY_NAME_ATTR), display_name);
    }

    /// Appends the kind-specific parameters of `spec`.
    ///
    /// Range bounds are always written; an unbounded side is written empty.
    pub fn push_payload(&mut self, spec: &FilterSpec) {
        let name = spec.name.as_str();
        match &spec.payload {
            FilterPayload::Range { key, from, to } => {
                self.push(param_key(name, KEY_ATTR), key);
                self.push(
                    param_key(name, FROM_ATTR),
                    from.as_deref().unwrap_or_default(),
                );
                self.push(param_key(name, TO_ATTR), to.as_deref().unwrap_or_default());
            }
            FilterPayload::Terms { key } => {
                self.push(param_key(name, KEY_ATTR), key);
            }
        }
    }

    fn push(&mut self, name: String, value: &str) {
        self.pairs.push((name, value.to_string()));
    }

    /// Returns true if no filter is applied.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the decoded pairs as request parameters.
    pub fn to_params(&self) -> RequestParams {
        RequestParams::from_pairs(self.pairs.iter().cloned())
    }

    /// Renders the fragment: `&k=v` per pair, form-urlencoded.
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        format!("&{}", encoded)
    }

    /// Decodes a fragment produced by [`AppliedFilters::to_query_string`].
    pub fn parse(fragment: &str) -> RequestParams {
        RequestParams::parse(fragment.trim_start_matches('&'))
    }
}

impl fmt::Display for AppliedFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl Serialize for AppliedFilters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_query_string())
    }
}
