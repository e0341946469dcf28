//! Contact form: validation and submission through the request client.
/// Form fields and validation rules
mod form;
/// Relay submission
mod mailer;

pub use form::{
    ContactForm,
    FieldError,
    MESSAGE_MAX_CHARS,
    NAME_MAX_CHARS,
};
pub use mailer::{
    ContactMailer,
    SUBMISSION_FAILED,
    Submission,
    SubmissionStatus,
};
