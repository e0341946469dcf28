//! Translation dictionary definitions

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

use super::source::LoadError;

/// One `{locale}/{namespace}.json` file: a JSON object whose values are
/// strings or nested objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(Map<String, Value>);

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// # Errors
    /// Returns [`LoadError::NotAnObject`] when the document root is not an object.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(LoadError::NotAnObject { found: json_kind(&other) }),
        }
    }

    /// # Errors
    /// Returns [`LoadError::Parse`] for invalid JSON and
    /// [`LoadError::NotAnObject`] when the root is not an object.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge: every top-level key of `other` replaces the key in `self`.
    /// Nested objects are not merged.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Walks nested objects along `segments`.
    ///
    /// Stops at the first missing segment or non-object value.
    #[must_use]
    pub fn lookup<'a, I>(&self, segments: I) -> Option<&Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = segments.into_iter();
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Flatten nested objects into separator-joined keys.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use portfolio_core::i18n::Dictionary;
    ///
    /// let dict = Dictionary::from_value(json!({
    ///     "nav": { "home": "Home", "blog": "Blog" }
    /// })).unwrap();
    ///
    /// let flattened = dict.flatten(".");
    /// assert_eq!(flattened.get("nav.home"), Some(&"Home".to_string()));
    /// ```
    #[must_use]
    pub fn flatten(&self, separator: &str) -> BTreeMap<String, String> {
        let mut result = BTreeMap::new();
        for (key, value) in &self.0 {
            flatten_value(value, separator, key, &mut result);
        }
        result
    }
}

impl From<Map<String, Value>> for Dictionary {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn flatten_value(
    value: &Value,
    separator: &str,
    prefix: &str,
    result: &mut BTreeMap<String, String>,
) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key = format!("{prefix}{separator}{key}");
                flatten_value(value, separator, &full_key, result);
            }
        }
        Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        // Not addressable by a translation key
        _ => {}
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn dict(value: Value) -> Dictionary {
        Dictionary::from_value(value).unwrap()
    }

    #[googletest::test]
    fn test_lookup_nested() {
        let d = dict(json!({ "site": { "meta": { "title": "Portfolio" } } }));

        expect_that!(d.lookup(["site", "meta", "title"]), some(eq(&json!("Portfolio"))));
        expect_that!(d.lookup(["site", "meta"]).map(Value::is_object), some(eq(true)));
    }

    #[rstest]
    #[case::missing_first(vec!["nope"])]
    #[case::missing_inner(vec!["site", "nope"])]
    #[case::through_string(vec!["site", "title", "deeper"])]
    #[case::empty(vec![])]
    fn test_lookup_fails(#[case] segments: Vec<&str>) {
        let d = dict(json!({ "site": { "title": "Portfolio" } }));

        assert!(d.lookup(segments).is_none());
    }

    #[googletest::test]
    fn test_merge_is_shallow() {
        let mut base = dict(json!({
            "nav": { "home": "Home", "blog": "Blog" },
            "footer": "Footer"
        }));
        let overlay = dict(json!({ "nav": { "home": "Start" } }));

        base.merge(overlay);

        expect_that!(base.lookup(["nav", "home"]), some(eq(&json!("Start"))));
        // the whole "nav" object was replaced
        expect_that!(base.lookup(["nav", "blog"]), none());
        expect_that!(base.lookup(["footer"]), some(eq(&json!("Footer"))));
    }

    #[googletest::test]
    fn test_flatten_skips_non_strings() {
        let d = dict(json!({
            "nav": { "home": "Home", "items": ["a", "b"] },
            "count": 3,
            "title": "Title"
        }));

        let result = d.flatten(".");

        expect_that!(result.get("nav.home"), some(eq(&"Home".to_string())));
        expect_that!(result.get("title"), some(eq(&"Title".to_string())));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_custom_separator() {
        let d = dict(json!({ "forms": { "email": "Email" } }));

        let result = d.flatten("_");

        expect_that!(result.get("forms_email"), some(eq(&"Email".to_string())));
    }

    #[rstest]
    #[case::array("[1, 2]", "array")]
    #[case::string("\"hello\"", "string")]
    #[case::null("null", "null")]
    fn test_from_json_str_rejects_non_objects(#[case] text: &str, #[case] kind: &str) {
        let result = Dictionary::from_json_str(text);

        assert!(matches!(result, Err(LoadError::NotAnObject { found }) if found == kind));
    }

    #[rstest]
    fn test_from_json_str_rejects_invalid_json() {
        let result = Dictionary::from_json_str("{ not json");

        assert!(matches!(result, Err(LoadError::Parse(_))));
    }
}
