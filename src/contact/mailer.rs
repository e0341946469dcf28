//! Submission of the contact form to the email relay.

use serde::Serialize;
use serde_json::Value;

use super::{
    ContactForm,
    FieldError,
};
use crate::config::ContactSettings;
use crate::http::{
    ReqwestTransport,
    RequestClient,
    RequestOptions,
    Transport,
};

/// Shown when the relay could not be reached or rejected the message.
pub const SUBMISSION_FAILED: &str =
    "There was an error sending your message. Please try again later.";

/// Body expected by the relay.
#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    access_key: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "errors", rename_all = "lowercase")]
pub enum SubmissionStatus {
    Success,
    Invalid(Vec<FieldError>),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub status: SubmissionStatus,
    /// User-facing message, set on failure.
    pub message: Option<String>,
}

impl Submission {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, SubmissionStatus::Success)
    }
}

/// Posts contact forms to the relay endpoint.
#[derive(Debug, Clone)]
pub struct ContactMailer<T = ReqwestTransport> {
    client: RequestClient<T>,
    endpoint: String,
}

impl<T: Transport> ContactMailer<T> {
    #[must_use]
    pub fn new(client: RequestClient<T>, endpoint: impl Into<String>) -> Self {
        Self { client, endpoint: endpoint.into() }
    }

    #[must_use]
    pub fn from_settings(client: RequestClient<T>, settings: &ContactSettings) -> Self {
        Self::new(client, settings.endpoint.as_str())
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `access_key` comes from page configuration; it is sent but never kept.
    pub async fn send(&self, form: &ContactForm, access_key: &str) -> Submission {
        if let Err(errors) = form.validate() {
            tracing::debug!(invalid_fields = errors.len(), "Contact form rejected");
            return Submission { status: SubmissionStatus::Invalid(errors), message: None };
        }

        let payload = RelayPayload {
            name: &form.name,
            email: &form.email,
            message: &form.message,
            access_key,
        };
        let outcome =
            self.client.post::<_, Value>(&self.endpoint, &payload, RequestOptions::new()).await;

        if outcome.is_success() {
            tracing::info!(endpoint = %self.endpoint, "Contact message sent");
            Submission { status: SubmissionStatus::Success, message: None }
        } else {
            Submission {
                status: SubmissionStatus::Failed,
                message: Some(SUBMISSION_FAILED.to_string()),
            }
        }
    }
}
