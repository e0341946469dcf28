//! Key lookup, fallback and interpolation over a merged dictionary.

use std::fmt::Display;

use serde_json::Value;

use super::Dictionary;
use crate::locale::Locale;

/// Interpolation variables, applied in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars(Vec<(String, String)>);

impl Vars {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.0.push((name.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces every `{name}` for each variable; unknown placeholders are kept.
    #[must_use]
    pub fn interpolate(&self, template: &str) -> String {
        let mut output = template.to_string();
        for (name, value) in &self.0 {
            let placeholder = format!("{{{name}}}");
            if output.contains(&placeholder) {
                output = output.replace(&placeholder, value);
            }
        }
        output
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Vars
where
    K: Into<String>,
    V: Display,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().fold(Self::new(), |vars, (name, value)| vars.with(name, value))
    }
}

/// Translation function closed over one merged dictionary.
///
/// Every method is total: an unresolved key degrades to the caller's fallback,
/// then to the capitalized last key segment.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    dictionary: Dictionary,
    separator: String,
}

impl Translator {
    #[must_use]
    pub fn new(locale: Locale, dictionary: Dictionary, separator: impl Into<String>) -> Self {
        Self { locale, dictionary, separator: separator.into() }
    }

    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    #[must_use]
    pub fn translate(&self, key: &str, vars: &Vars, fallback: Option<&str>) -> String {
        let resolved = self.lookup(key).map_or_else(
            || fallback.map_or_else(|| humanize(key, &self.separator), ToString::to_string),
            ToString::to_string,
        );
        vars.interpolate(&resolved)
    }

    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.translate(key, &Vars::new(), None)
    }

    #[must_use]
    pub fn t_or(&self, key: &str, fallback: &str) -> String {
        self.translate(key, &Vars::new(), Some(fallback))
    }

    #[must_use]
    pub fn t_with(&self, key: &str, vars: &Vars) -> String {
        self.translate(key, vars, None)
    }

    /// Only string values resolve a key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        match self.dictionary.lookup(key.split(self.separator.as_str())) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// `"nav.home"` -> `"Home"`, `"user.profile.settings"` -> `"Settings"`.
fn humanize(key: &str, separator: &str) -> String {
    let last = key.rsplit(separator).next().unwrap_or(key);
    let mut chars = last.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}
