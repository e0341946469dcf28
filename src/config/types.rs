use std::collections::BTreeMap;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "i18n.locales[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Root of `.portfolio.json`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub i18n: I18nSettings,
    pub http: HttpSettings,
    pub contact: ContactSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Directory holding `{locale}/{namespace}.json`, relative to the site root.
    pub messages_dir: String,

    pub locales: Vec<String>,
    pub default_locale: String,

    /// Display names for the language switcher.
    /// Locales without an entry are shown by their code.
    pub locale_names: BTreeMap<String, String>,

    /// Always loaded before the requested namespaces.
    pub base_namespace: String,

    pub key_separator: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpSettings {
    /// Per-attempt timeout.
    pub timeout_ms: u64,
    /// Additional attempts after the first one.
    pub retries: u32,
    /// Base of the linear backoff (`retry_delay * (attempt + 1)`).
    pub retry_delay_ms: u64,
}

impl HttpSettings {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSettings {
    /// Email relay endpoint the contact form posts to.
    pub endpoint: String,
}

impl Settings {
    /// # Errors
    /// - Required field is empty
    /// - Default locale is not one of the supported locales
    /// - Invalid timeout or endpoint
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        self.i18n.validate_into(&mut errors);
        self.http.validate_into(&mut errors);
        self.contact.validate_into(&mut errors);

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl I18nSettings {
    fn validate_into(&self, errors: &mut Vec<ValidationError>) {
        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "i18n.keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.locales.is_empty() {
            errors.push(ValidationError::new(
                "i18n.locales",
                "At least one locale is required. Example: [\"en\", \"nl\"]",
            ));
        }

        for (index, locale) in self.locales.iter().enumerate() {
            if locale.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("i18n.locales[{index}]"),
                    "Locale codes cannot be empty",
                ));
            }
        }

        if !self.locales.is_empty() && !self.locales.contains(&self.default_locale) {
            errors.push(ValidationError::new(
                "i18n.defaultLocale",
                format!(
                    "Default locale '{}' must be one of the supported locales: {}",
                    self.default_locale,
                    self.locales.join(", ")
                ),
            ));
        }

        if self.base_namespace.is_empty() {
            errors.push(ValidationError::new(
                "i18n.baseNamespace",
                "The base namespace cannot be empty. Example: \"common\"",
            ));
        }

        if self.messages_dir.is_empty() {
            errors.push(ValidationError::new(
                "i18n.messagesDir",
                "The messages directory cannot be empty. Example: \"src/i18n/messages\"",
            ));
        }
    }
}

impl HttpSettings {
    fn validate_into(&self, errors: &mut Vec<ValidationError>) {
        if self.timeout_ms == 0 {
            errors.push(ValidationError::new(
                "http.timeoutMs",
                "The timeout must be greater than zero milliseconds",
            ));
        }
    }
}

impl ContactSettings {
    fn validate_into(&self, errors: &mut Vec<ValidationError>) {
        if self.endpoint.is_empty() {
            errors.push(ValidationError::new(
                "contact.endpoint",
                "The endpoint cannot be empty. Example: \"https://api.web3forms.com/submit\"",
            ));
        } else if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            errors.push(ValidationError::new(
                "contact.endpoint",
                format!("Endpoint '{}' must be an http(s) URL", self.endpoint),
            ));
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            messages_dir: "src/i18n/messages".to_string(),
            locales: vec!["en".to_string(), "nl".to_string()],
            default_locale: "en".to_string(),
            locale_names: BTreeMap::from([
                ("en".to_string(), "English".to_string()),
                ("nl".to_string(), "Nederlands".to_string()),
            ]),
            base_namespace: "common".to_string(),
            key_separator: ".".to_string(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_ms: 10_000, retries: 2, retry_delay_ms: 1_000 }
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self { endpoint: "https://api.web3forms.com/submit".to_string() }
    }
}
