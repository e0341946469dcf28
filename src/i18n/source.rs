//! Where dictionaries come from.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::Dictionary;

#[derive(Error, Debug)]
pub enum LoadError {
    /// No dictionary exists for this locale and namespace.
    #[error("Dictionary not found: {0}")]
    NotFound(String),
    #[error("Failed to read dictionary: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse dictionary: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Dictionary root must be an object, found {found}")]
    NotAnObject { found: &'static str },
}

impl LoadError {
    /// Missing files are expected; everything else is a broken file.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Loads the dictionary of one (locale, namespace) pair.
pub trait DictionarySource {
    fn load(
        &self,
        locale: &str,
        namespace: &str,
    ) -> impl Future<Output = Result<Dictionary, LoadError>> + Send;
}

/// Reads `{root}/{locale}/{namespace}.json`.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, locale: &str, namespace: &str) -> PathBuf {
        self.root.join(locale).join(format!("{namespace}.json"))
    }
}

impl DictionarySource for FsSource {
    async fn load(&self, locale: &str, namespace: &str) -> Result<Dictionary, LoadError> {
        let path = self.path_for(locale, namespace);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(LoadError::Io(e)),
        };
        Dictionary::from_json_str(&content)
    }
}

/// Dictionaries held in memory, e.g. embedded at build time.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dictionaries: HashMap<(String, String), Dictionary>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(
        mut self,
        locale: impl Into<String>,
        namespace: impl Into<String>,
        dictionary: Dictionary,
    ) -> Self {
        self.insert(locale, namespace, dictionary);
        self
    }

    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        namespace: impl Into<String>,
        dictionary: Dictionary,
    ) {
        self.dictionaries.insert((locale.into(), namespace.into()), dictionary);
    }
}

impl DictionarySource for MemorySource {
    async fn load(&self, locale: &str, namespace: &str) -> Result<Dictionary, LoadError> {
        self.dictionaries
            .get(&(locale.to_string(), namespace.to_string()))
            .cloned()
            .ok_or_else(|| LoadError::NotFound(format!("{locale}/{namespace}")))
    }
}
