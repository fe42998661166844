//! Ordered, multi-valued request parameters.
//!
//! Facet links repeat `filter.name` once per applied filter and address the
//! rest of each filter through composed keys (`<name>.type`, `<name>.key`),
//! so a plain `HashMap<String, String>` loses information. [`RequestParams`]
//! keeps every pair in the order it arrived.

use url::form_urlencoded;

/// An ordered multi-map of decoded `name=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    /// Parses an `application/x-www-form-urlencoded` string.
    ///
    /// A leading `?` or `&` is tolerated, so both a URL query and an applied
    /// filter fragment can be parsed directly.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_start_matches('?');
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Creates a parameter bag from already-decoded pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the first value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `name`, in arrival order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Checks if a parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_repeated_names_in_order() {
        let params =
            RequestParams::parse("filter.name=regularPrice&filter.name=department&query=tv");

        assert_eq!(
            params.get_all("filter.name"),
            vec!["regularPrice", "department"]
        );
        assert_eq!(params.get("query"), Some("tv"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_parse_decodes_values() {
        let params = RequestParams::parse("?department.key=VIDEO+GAMES%2FAPPS&q=%24%24");

        assert_eq!(params.get("department.key"), Some("VIDEO GAMES/APPS"));
        assert_eq!(params.get("q"), Some("$$"));
    }

    #[test]
    fn test_parse_tolerates_leading_ampersand() {
        let params = RequestParams::parse("&filter.name=department&department.type=terms");

        assert_eq!(params.get("filter.name"), Some("department"));
        assert_eq!(params.get("department.type"), Some("terms"));
    }

    #[test]
    fn test_empty_value_is_present() {
        let params = RequestParams::parse("regularPrice.to=");

        assert!(params.contains("regularPrice.to"));
        assert_eq!(params.get("regularPrice.to"), Some(""));
        assert_eq!(params.get("regularPrice.from"), None);
    }

    #[test]
    fn test_from_pairs() {
        let params: RequestParams = vec![("a", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(params.get_all("a"), vec!["1", "2"]);
        assert!(!params.is_empty());
    }
}
