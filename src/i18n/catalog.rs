//! Discovery of dictionary files and translation coverage.

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::path::{
    Path,
    PathBuf,
};

use globset::{
    GlobBuilder,
    GlobMatcher,
};
use ignore::WalkBuilder;
use serde::Serialize;
use thiserror::Error;

use super::DictionarySource;

/// `{locale}/{namespace}.json`, relative to the messages directory.
const DICTIONARY_PATTERN: &str = "*/*.json";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Messages directory does not exist: {0}")]
    MissingRoot(PathBuf),
    #[error("Invalid dictionary pattern: {0}")]
    Pattern(#[from] globset::Error),
}

/// The (locale, namespace) pairs present in a messages directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, BTreeSet<String>>,
}

/// Namespaces and keys a locale is missing relative to the default locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub missing_namespaces: Vec<String>,
    /// `namespace:key` entries.
    pub missing_keys: Vec<String>,
}

impl Coverage {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_namespaces.is_empty() && self.missing_keys.is_empty()
    }
}

impl Catalog {
    /// Walk `root` and record every `{locale}/{namespace}.json`.
    ///
    /// # Errors
    /// - `root` does not exist
    pub fn scan(root: &Path) -> Result<Self, CatalogError> {
        if !root.is_dir() {
            return Err(CatalogError::MissingRoot(root.to_path_buf()));
        }

        let matcher =
            GlobBuilder::new(DICTIONARY_PATTERN).literal_separator(true).build()?.compile_matcher();
        let mut catalog = Self::default();

        for result in WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(false)
            .max_depth(Some(2))
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Ok(relative_path) = entry.path().strip_prefix(root) else {
                continue;
            };
            if let Some((locale, namespace)) = Self::classify(&matcher, relative_path) {
                catalog.insert(locale, namespace);
            }
        }

        tracing::debug!(
            root = %root.display(),
            locales = catalog.entries.len(),
            "Scanned catalog"
        );
        Ok(catalog)
    }

    fn classify(matcher: &GlobMatcher, relative_path: &Path) -> Option<(String, String)> {
        if !matcher.is_match(relative_path) {
            return None;
        }
        let namespace = relative_path.file_stem()?.to_str()?;
        let locale = relative_path.parent()?.file_name()?.to_str()?;
        Some((locale.to_string(), namespace.to_string()))
    }

    pub fn insert(&mut self, locale: impl Into<String>, namespace: impl Into<String>) {
        self.entries.entry(locale.into()).or_default().insert(namespace.into());
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn namespaces(&self, locale: &str) -> impl Iterator<Item = &str> {
        self.entries.get(locale).into_iter().flatten().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, locale: &str, namespace: &str) -> bool {
        self.entries.get(locale).is_some_and(|ns| ns.contains(namespace))
    }

    /// Compare `locale` against `default`, namespace by namespace.
    ///
    /// Dictionaries that fail to load count as empty.
    pub async fn coverage<S: DictionarySource>(
        &self,
        source: &S,
        default: &str,
        locale: &str,
        separator: &str,
    ) -> Coverage {
        let mut coverage = Coverage::default();
        if default == locale {
            return coverage;
        }

        for namespace in self.namespaces(default) {
            if !self.contains(locale, namespace) {
                coverage.missing_namespaces.push(namespace.to_string());
                continue;
            }

            let (reference, translated) =
                futures::join!(source.load(default, namespace), source.load(locale, namespace));
            let reference = reference.map(|d| d.flatten(separator)).unwrap_or_default();
            let translated = translated.map(|d| d.flatten(separator)).unwrap_or_default();

            coverage.missing_keys.extend(
                reference
                    .keys()
                    .filter(|key| !translated.contains_key(*key))
                    .map(|key| format!("{namespace}:{key}")),
            );
        }

        coverage.missing_namespaces.sort();
        coverage.missing_keys.sort();
        coverage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::i18n::FsSource;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[fixture]
    fn messages() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "en/common.json", r#"{"site": {"title": "Portfolio", "tagline": "Hi"}}"#);
        write(root, "en/ui.json", r#"{"buttons": {"submit": "Send"}}"#);
        write(root, "en/blog.json", r#"{"title": "Blog"}"#);
        write(root, "nl/common.json", r#"{"site": {"title": "Portfolio"}}"#);
        write(root, "nl/ui.json", r#"{"buttons": {"submit": "Verstuur"}}"#);
        write(root, "nl/README.md", "not a dictionary");
        write(root, "stray.json", "{}");
        write(root, "nl/drafts/old.json", "{}");
        temp_dir
    }

    #[rstest]
    fn scan_finds_locale_namespace_pairs(messages: TempDir) {
        let catalog = Catalog::scan(messages.path()).unwrap();

        let locales: Vec<&str> = catalog.locales().collect();
        assert_that!(locales, elements_are![eq(&"en"), eq(&"nl")]);
        let namespaces: Vec<&str> = catalog.namespaces("en").collect();
        assert_that!(namespaces, elements_are![eq(&"blog"), eq(&"common"), eq(&"ui")]);
        assert!(catalog.contains("nl", "ui"));
        assert!(!catalog.contains("nl", "blog"));
        assert!(!catalog.contains("nl", "old"));
    }

    #[rstest]
    fn scan_rejects_missing_root() {
        let temp_dir = TempDir::new().unwrap();

        let result = Catalog::scan(&temp_dir.path().join("nope"));

        assert!(matches!(result, Err(CatalogError::MissingRoot(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn coverage_reports_missing_namespaces_and_keys(messages: TempDir) {
        let catalog = Catalog::scan(messages.path()).unwrap();
        let source = FsSource::new(messages.path());

        let coverage = catalog.coverage(&source, "en", "nl", ".").await;

        assert_eq!(coverage.missing_namespaces, vec!["blog"]);
        assert_eq!(coverage.missing_keys, vec!["common:site.tagline"]);
        assert!(!coverage.is_complete());
    }

    #[rstest]
    #[tokio::test]
    async fn coverage_of_default_locale_is_complete(messages: TempDir) {
        let catalog = Catalog::scan(messages.path()).unwrap();
        let source = FsSource::new(messages.path());

        let coverage = catalog.coverage(&source, "en", "en", ".").await;

        assert!(coverage.is_complete());
    }
}
