//! Contact form fields and validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

pub const NAME_MAX_CHARS: usize = 120;
pub const MESSAGE_MAX_CHARS: usize = 5000;

/// Same shape browsers accept for `<input type="email">`.
static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .ok()
});

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), email: email.into(), message: message.into() }
    }

    /// Reports every failing field, in field order.
    ///
    /// # Errors
    /// Returns the list of field errors when any field is invalid.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if name_len == 0 {
            errors.push(FieldError::new("name", "Name is required"));
        } else if name_len > NAME_MAX_CHARS {
            errors.push(FieldError::new(
                "name",
                format!("Name must be at most {NAME_MAX_CHARS} characters"),
            ));
        }

        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Please enter a valid email"));
        }

        let message_len = self.message.chars().count();
        if message_len == 0 {
            errors.push(FieldError::new("message", "Message is required"));
        } else if message_len > MESSAGE_MAX_CHARS {
            errors.push(FieldError::new(
                "message",
                format!("Message must be at most {MESSAGE_MAX_CHARS} characters"),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|re| re.is_match(email))
}
