//! Builds a [`Translator`] for a locale and a set of namespaces.

use serde::Serialize;

use super::{
    Dictionary,
    DictionarySource,
    LoadError,
    Translator,
};
use crate::config::I18nSettings;
use crate::locale::{
    Locale,
    LocaleError,
    LocaleSet,
    TextDirection,
};

/// Outcome of one dictionary load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum LoadStatus {
    Loaded,
    Missing,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadEntry {
    pub locale: Locale,
    pub namespace: String,
    pub status: LoadStatus,
}

/// Every load attempted by one resolution, in merge order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    entries: Vec<LoadEntry>,
}

impl LoadReport {
    #[must_use]
    pub fn entries(&self) -> &[LoadEntry] {
        &self.entries
    }

    /// True when every attempted load succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.status == LoadStatus::Loaded)
    }

    /// Loads that contributed nothing to the merged dictionary.
    pub fn skipped(&self) -> impl Iterator<Item = &LoadEntry> {
        self.entries.iter().filter(|e| e.status != LoadStatus::Loaded)
    }

    fn push(&mut self, locale: &Locale, namespace: &str, status: LoadStatus) {
        self.entries.push(LoadEntry {
            locale: locale.clone(),
            namespace: namespace.to_string(),
            status,
        });
    }
}

/// Result of [`Resolver::resolve`].
#[derive(Debug, Clone)]
pub struct Resolution {
    pub translator: Translator,
    /// The locale actually used; the default when the request was unsupported.
    pub locale: Locale,
    pub direction: TextDirection,
    pub report: LoadReport,
}

/// Resolves translators from a [`DictionarySource`].
///
/// Holds no cache: every call reloads its dictionaries.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    source: S,
    locales: LocaleSet,
    base_namespace: String,
    separator: String,
}

impl<S: DictionarySource> Resolver<S> {
    #[must_use]
    pub fn new(
        source: S,
        locales: LocaleSet,
        base_namespace: impl Into<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            source,
            locales,
            base_namespace: base_namespace.into(),
            separator: separator.into(),
        }
    }

    /// # Errors
    /// Returns [`LocaleError`] when the configured locales are inconsistent.
    pub fn from_settings(source: S, settings: &I18nSettings) -> Result<Self, LocaleError> {
        let locales = LocaleSet::from_settings(settings)?;
        Ok(Self::new(
            source,
            locales,
            settings.base_namespace.as_str(),
            settings.key_separator.as_str(),
        ))
    }

    #[must_use]
    pub const fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The base namespace followed by `requested`, without duplicates.
    #[must_use]
    pub fn namespaces<'a>(&'a self, requested: &[&'a str]) -> Vec<&'a str> {
        let mut wanted: Vec<&str> = Vec::with_capacity(requested.len() + 1);
        for ns in std::iter::once(self.base_namespace.as_str()).chain(requested.iter().copied()) {
            if !wanted.contains(&ns) {
                wanted.push(ns);
            }
        }
        wanted
    }

    /// Never fails; missing or broken dictionaries are recorded in the report and skipped.
    pub async fn resolve(&self, locale: &str, namespaces: &[&str]) -> Resolution {
        let active = self.locales.negotiate(locale);
        let default = self.locales.default_locale();
        let direction = active.direction();

        let mut plan: Vec<(&Locale, &str)> = Vec::new();
        for ns in self.namespaces(namespaces) {
            plan.push((default, ns));
            if &active != default {
                plan.push((&active, ns));
            }
        }

        let loads = plan.iter().map(|(locale, ns)| self.source.load(locale.as_str(), ns));
        let results = futures::future::join_all(loads).await;

        let mut merged = Dictionary::new();
        let mut report = LoadReport::default();
        for ((locale, ns), result) in plan.iter().zip(results) {
            let status = match result {
                Ok(dictionary) => {
                    merged.merge(dictionary);
                    LoadStatus::Loaded
                }
                Err(e) => Self::skip(locale, ns, &e),
            };
            report.push(locale, ns, status);
        }

        tracing::debug!(
            locale = %active,
            requested = locale,
            keys = merged.len(),
            complete = report.is_complete(),
            "Resolved translations"
        );

        Resolution {
            translator: Translator::new(active.clone(), merged, self.separator.as_str()),
            locale: active,
            direction,
            report,
        }
    }

    /// Shorthand for [`Resolver::resolve`] when only the translator is needed.
    pub async fn translator(&self, locale: &str, namespaces: &[&str]) -> Translator {
        self.resolve(locale, namespaces).await.translator
    }

    fn skip(locale: &Locale, namespace: &str, error: &LoadError) -> LoadStatus {
        if error.is_not_found() {
            tracing::debug!(%locale, namespace, "Dictionary missing, skipping");
            LoadStatus::Missing
        } else {
            tracing::warn!(%locale, namespace, %error, "Failed to load dictionary, skipping");
            LoadStatus::Failed(error.to_string())
        }
    }
}
