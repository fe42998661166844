//! Sort specification and free-text input normalisation.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Field sorted on when the request names none.
pub const DEFAULT_SORT_FIELD: &str = "_score";

/// The sentinel free-text value meaning "no text restriction".
pub const MATCH_ALL_SENTINEL: &str = "*";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order (default).
    #[default]
    Desc,
}

impl SortDirection {
    /// Parses a direction, case-insensitively.
    ///
    /// Missing, empty and unknown values all fall back to [`SortDirection::Desc`].
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => SortDirection::Asc,
            Some("desc") | Some("") | None => SortDirection::Desc,
            Some(other) => {
                debug!(sort_dir = %other, "Unknown sort direction, using desc");
                SortDirection::Desc
            }
        }
    }

    /// Returns the query DSL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `{field: direction}` sort entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// The field to sort on.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Builds a sort spec from raw request values, substituting defaults.
    pub fn from_params(field: Option<&str>, direction: Option<&str>) -> Self {
        let field = field
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_SORT_FIELD);
        Self {
            field: field.to_string(),
            direction: SortDirection::parse_or_default(direction),
        }
    }

    /// Renders the sort array containing exactly this entry.
    pub fn to_value(&self) -> Value {
        let mut entry = Map::new();
        entry.insert(
            self.field.clone(),
            Value::String(self.direction.as_str().to_string()),
        );
        Value::Array(vec![Value::Object(entry)])
    }
}

/// Normalised free-text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserQuery {
    /// No text restriction (`*`, empty or missing input).
    MatchAll,
    /// Text to match against the product fields.
    Text(String),
}

impl UserQuery {
    /// Normalises raw input: missing, blank and `*` become [`UserQuery::MatchAll`].
    pub fn new(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(MATCH_ALL_SENTINEL) => UserQuery::MatchAll,
            Some(text) => UserQuery::Text(text.to_string()),
        }
    }

    /// Returns the text as shown back to the user (`*` for match-all).
    pub fn as_str(&self) -> &str {
        match self {
            UserQuery::MatchAll => MATCH_ALL_SENTINEL,
            UserQuery::Text(text) => text,
        }
    }

    /// Returns true for the match-all sentinel.
    pub fn is_match_all(&self) -> bool {
        matches!(self, UserQuery::MatchAll)
    }
}

impl fmt::Display for UserQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
