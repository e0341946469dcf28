//! Supported locales, text direction and language switching.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::config::I18nSettings;

/// Locale codes written right-to-left.
const RTL_LOCALES: [&str; 4] = ["ar", "he", "fa", "ur"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("At least one supported locale is required")]
    Empty,
    #[error("Default locale '{default}' is not one of the supported locales: {}", .supported.join(", "))]
    UnsupportedDefault { default: String, supported: Vec<String> },
}

/// A locale code known to be in a [`LocaleSet`].
///
/// Only [`LocaleSet`] hands these out, so holding one means the code is supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn direction(&self) -> TextDirection {
        TextDirection::for_locale(&self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Unmapped codes are left-to-right.
    #[must_use]
    pub fn for_locale(code: &str) -> Self {
        if RTL_LOCALES.contains(&code) { Self::Rtl } else { Self::Ltr }
    }

    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of the language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleOption {
    pub code: Locale,
    pub label: String,
}

/// The closed set of locales a site is translated into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    supported: Vec<Locale>,
    default: Locale,
    names: BTreeMap<String, String>,
}

impl LocaleSet {
    /// Duplicate codes are collapsed, keeping the first occurrence.
    ///
    /// # Errors
    /// - `locales` is empty
    /// - `default` is not in `locales`
    pub fn new<I, S>(
        locales: I,
        default: &str,
        names: BTreeMap<String, String>,
    ) -> Result<Self, LocaleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut supported: Vec<Locale> = Vec::new();
        for code in locales {
            let locale = Locale(code.into());
            if !supported.contains(&locale) {
                supported.push(locale);
            }
        }

        if supported.is_empty() {
            return Err(LocaleError::Empty);
        }

        let Some(default) = supported.iter().find(|l| l.as_str() == default).cloned() else {
            return Err(LocaleError::UnsupportedDefault {
                default: default.to_string(),
                supported: supported.iter().map(ToString::to_string).collect(),
            });
        };

        Ok(Self { supported, default, names })
    }

    /// # Errors
    /// Same as [`LocaleSet::new`].
    pub fn from_settings(settings: &I18nSettings) -> Result<Self, LocaleError> {
        Self::new(
            settings.locales.iter().cloned(),
            &settings.default_locale,
            settings.locale_names.clone(),
        )
    }

    #[must_use]
    pub const fn default_locale(&self) -> &Locale {
        &self.default
    }

    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Looks up a supported locale by its exact code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.supported.iter().find(|l| l.as_str() == code)
    }

    /// Maps any code onto a supported locale, falling back to the default.
    #[must_use]
    pub fn negotiate(&self, code: &str) -> Locale {
        self.get(code).cloned().unwrap_or_else(|| {
            tracing::debug!(
                requested = code,
                fallback = %self.default,
                "Unsupported locale, using default"
            );
            self.default.clone()
        })
    }

    /// Supported locales in configuration order (one static path each).
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.supported.iter()
    }

    #[must_use]
    pub fn display_name<'a>(&'a self, locale: &'a Locale) -> &'a str {
        self.names.get(locale.as_str()).map_or(locale.as_str(), String::as_str)
    }

    #[must_use]
    pub fn options(&self) -> Vec<LocaleOption> {
        self.supported
            .iter()
            .map(|code| LocaleOption {
                code: code.clone(),
                label: self.display_name(code).to_string(),
            })
            .collect()
    }

    /// Rewrites `path` so it points at the same page in `target`.
    ///
    /// Only the first `/{current}` is replaced; paths without it are returned as is.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeMap;
    /// use portfolio_core::locale::LocaleSet;
    ///
    /// let locales = LocaleSet::new(["en", "nl"], "en", BTreeMap::new()).unwrap();
    /// assert_eq!(locales.switch_path("/en/blog/hello", "en", "nl"), "/nl/blog/hello");
    /// ```
    #[must_use]
    pub fn switch_path(&self, path: &str, current: &str, target: &str) -> String {
        let target = self.negotiate(target);
        let from = format!("/{current}");
        let to = format!("/{target}");
        path.replacen(&from, &to, 1)
    }
}

impl Default for LocaleSet {
    fn default() -> Self {
        let settings = I18nSettings::default();
        let default = Locale(settings.default_locale);
        Self {
            supported: settings.locales.into_iter().map(Locale).collect(),
            default,
            names: settings.locale_names,
        }
    }
}
