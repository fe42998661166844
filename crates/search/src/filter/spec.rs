//! Typed facet filters.
//!
//! A facet filter is addressed in request parameters by its name: the name
//! appears in the repeated `filter.name` parameter and every other attribute
//! lives under `<name>.<attribute>`.

use std::fmt;

use serde::Serialize;

use crate::error::FilterError;
use crate::params::RequestParams;
use crate::query::QueryClause;

/// The repeated parameter listing the active filter names.
pub const FILTER_NAME_PARAM: &str = "filter.name";

/// Attribute holding the filter kind.
pub const TYPE_ATTR: &str = "type";
/// Attribute holding the human-readable label.
pub const DISPLAY_NAME_ATTR: &str = "displayName";
/// Attribute holding the clicked bucket key.
pub const KEY_ATTR: &str = "key";
/// Attribute holding the inclusive lower bound of a range filter.
pub const FROM_ATTR: &str = "from";
/// Attribute holding the inclusive upper bound of a range filter.
pub const TO_ATTR: &str = "to";

/// Returns the parameter name of `attr` for filter `name`, e.g. `department.key`.
pub fn param_key(name: &str, attr: &str) -> String {
    format!("{}.{}", name, attr)
}

/// The kind of a facet filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Numeric range with optional inclusive bounds.
    Range,
    /// Exact match on a single term.
    Terms,
}

impl FilterKind {
    /// Parses the `<name>.type` value of filter `name`, case-insensitively.
    pub fn from_param(name: &str, raw: Option<&str>) -> Result<Self, FilterError> {
        match raw.map(|k| k.trim().to_ascii_lowercase()).as_deref() {
            Some("range") => Ok(FilterKind::Range),
            Some("terms") => Ok(FilterKind::Terms),
            _ => Err(FilterError::UnrecognizedFilterKind {
                name: name.to_string(),
                kind: raw.map(str::to_string),
            }),
        }
    }

    /// Returns the wire spelling carried in links.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Range => "range",
            FilterKind::Terms => "terms",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific filter data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterPayload {
    /// A range filter; `None` bounds are unbounded.
    Range {
        /// The bucket key that was clicked (label only).
        key: String,
        /// Inclusive lower bound.
        from: Option<String>,
        /// Inclusive upper bound.
        to: Option<String>,
    },
    /// A term filter.
    Terms {
        /// The selected term.
        key: String,
    },
}

/// One user-selected facet constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    /// Facet identifier, which is also the field filtered on.
    pub name: String,
    /// Human label; defaults to `name`.
    pub display_name: String,
    /// Kind-specific data.
    #[serde(flatten)]
    pub payload: FilterPayload,
}

impl FilterSpec {
    /// Creates a range filter.
    pub fn range(
        name: impl Into<String>,
        key: impl Into<String>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            payload: FilterPayload::Range {
                key: key.into(),
                from: non_empty(from),
                to: non_empty(to),
            },
        }
    }

    /// Creates a terms filter.
    pub fn terms(name: impl Into<String>, key: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            payload: FilterPayload::Terms { key: key.into() },
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Decodes filter `name` from request parameters.
    pub fn from_params(name: &str, params: &RequestParams) -> Result<Self, FilterError> {
        let kind = FilterKind::from_param(name, params.get(&param_key(name, TYPE_ATTR)))?;
        let display_name = display_name_param(name, params);
        Ok(Self::read_payload(name, kind, display_name, params))
    }

    /// Reads the kind-specific attributes once the kind is known.
    ///
    /// A missing key decodes as the empty string and empty bounds as unbounded.
    pub(crate) fn read_payload(
        name: &str,
        kind: FilterKind,
        display_name: &str,
        params: &RequestParams,
    ) -> Self {
        let key = params.get(&param_key(name, KEY_ATTR)).unwrap_or_default();
        let spec = match kind {
            FilterKind::Range => FilterSpec::range(
                name,
                key,
                params.get(&param_key(name, FROM_ATTR)),
                params.get(&param_key(name, TO_ATTR)),
            ),
            FilterKind::Terms => FilterSpec::terms(name, key),
        };
        spec.with_display_name(display_name)
    }

    /// Returns the filter kind.
    pub fn kind(&self) -> FilterKind {
        match self.payload {
            FilterPayload::Range { .. } => FilterKind::Range,
            FilterPayload::Terms { .. } => FilterKind::Terms,
        }
    }

    /// Returns the clicked bucket key, shared by both kinds.
    pub fn key(&self) -> &str {
        match &self.payload {
            FilterPayload::Range { key, .. } | FilterPayload::Terms { key } => key,
        }
    }

    /// Builds the query clause for this filter.
    pub fn to_clause(&self) -> QueryClause {
        match &self.payload {
            FilterPayload::Range { from, to, .. } => {
                QueryClause::range(&self.name, from.as_deref(), to.as_deref())
            }
            FilterPayload::Terms { key } => QueryClause::term(&self.name, key),
        }
    }

    /// Builds the label shown in the applied-filters list.
    pub fn display(&self) -> DisplayFilter {
        DisplayFilter(format!("{} {}", self.display_name, self.key()))
    }
}

/// Returns `<name>.displayName`, defaulting to `name`.
pub(crate) fn display_name_param<'a>(name: &'a str, params: &'a RequestParams) -> &'a str {
    params
        .get(&param_key(name, DISPLAY_NAME_ATTR))
        .unwrap_or(name)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// A label pairing a filter's display name with its selected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayFilter(String);

impl DisplayFilter {
    /// Returns the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
