//! Filter codec: request parameters in, clauses, labels and link state out.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::FilterError;
use crate::params::RequestParams;
use crate::query::QueryClause;

use super::applied::AppliedFilters;
use super::spec::{
    DisplayFilter, FILTER_NAME_PARAM, FilterKind, FilterSpec, TYPE_ATTR, display_name_param,
    param_key,
};

/// What to do with a filter whose kind is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Drop the offending filter, keep decoding the rest.
    #[default]
    Lenient,
    /// Fail the whole request on the first offending filter.
    Strict,
}

impl FromStr for FilterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(FilterPolicy::Lenient),
            "strict" => Ok(FilterPolicy::Strict),
            other => Err(format!(
                "invalid filter policy '{}', expected 'lenient' or 'strict'",
                other
            )),
        }
    }
}

impl fmt::Display for FilterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPolicy::Lenient => f.write_str("lenient"),
            FilterPolicy::Strict => f.write_str("strict"),
        }
    }
}

/// The result of decoding the active filters of one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedFilters {
    /// The decoded filters, in request order.
    pub specs: Vec<FilterSpec>,
    /// One query clause per decoded filter.
    pub clauses: Vec<QueryClause>,
    /// One label per decoded filter.
    pub display_filters: Vec<DisplayFilter>,
    /// The state to append to every link on the result page.
    pub applied: AppliedFilters,
    /// Filters dropped under the lenient policy.
    pub rejected: Vec<FilterError>,
}

/// Decodes facet filters from request parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCodec {
    policy: FilterPolicy,
}

impl FilterCodec {
    /// Creates a codec with the given policy.
    pub fn new(policy: FilterPolicy) -> Self {
        Self { policy }
    }

    /// Returns the configured policy.
    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Decodes every filter listed in the request's `filter.name` parameters.
    pub fn decode_request(&self, params: &RequestParams) -> Result<DecodedFilters, FilterError> {
        let names = params.get_all(FILTER_NAME_PARAM);
        self.decode(&names, params)
    }

    /// Decodes the named filters, in order.
    ///
    /// A name listed more than once is decoded at its first occurrence only.
    pub fn decode(
        &self,
        names: &[&str],
        params: &RequestParams,
    ) -> Result<DecodedFilters, FilterError> {
        let mut decoded = DecodedFilters::default();
        let mut seen = HashSet::new();

        for &name in names {
            if !seen.insert(name) {
                debug!(filter = %name, "Skipping duplicate filter name");
                continue;
            }

            let raw_kind = params.get(&param_key(name, TYPE_ATTR));
            let kind = match FilterKind::from_param(name, raw_kind) {
                Ok(kind) => kind,
                Err(err) => match self.policy {
                    FilterPolicy::Strict => return Err(err),
                    FilterPolicy::Lenient => {
                        warn!(filter = %name, error = %err, "Dropping filter");
                        decoded.rejected.push(err);
                        continue;
                    }
                },
            };
            let display_name = display_name_param(name, params);

            // The header goes in before the payload is read so the link state
            // keeps the filter even when its payload is partial.
            decoded.applied.push_header(name, kind, display_name);

            let spec = FilterSpec::read_payload(name, kind, display_name, params);
            decoded.applied.push_payload(&spec);
            decoded.clauses.push(spec.to_clause());
            decoded.display_filters.push(spec.display());
            decoded.specs.push(spec);
        }

        debug!(
            decoded = decoded.specs.len(),
            rejected = decoded.rejected.len(),
            "Decoded filters"
        );

        Ok(decoded)
    }
}
