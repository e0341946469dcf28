//! Uniform result shape of the request client.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// The only error text a caller ever receives.
pub const GENERIC_ERROR: &str = "Request failed. Please try again later.";

/// `{ data, error, success }`: exactly one of `data` / `error` is set.
///
/// Deserializing rejects any other combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawOutcome<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Outcome<T> {
    data: Option<T>,
    error: Option<String>,
    success: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutcomeShapeError {
    #[error("A successful outcome must carry data and no error")]
    Success,
    #[error("A failed outcome must carry an error and no data")]
    Failure,
}

/// Wire shape before the invariant is checked.
#[derive(Deserialize)]
struct RawOutcome<T> {
    data: Option<T>,
    error: Option<String>,
    success: bool,
}

impl<T> TryFrom<RawOutcome<T>> for Outcome<T> {
    type Error = OutcomeShapeError;

    fn try_from(raw: RawOutcome<T>) -> Result<Self, Self::Error> {
        match (raw.success, raw.data, raw.error) {
            (true, Some(data), None) => Ok(Self::ok(data)),
            (true, ..) => Err(OutcomeShapeError::Success),
            (false, None, Some(error)) => {
                Ok(Self { data: None, error: Some(error), success: false })
            }
            (false, ..) => Err(OutcomeShapeError::Failure),
        }
    }
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self { data: Some(data), error: None, success: true }
    }

    /// Carries [`GENERIC_ERROR`]; the cause is only logged.
    #[must_use]
    pub fn failure() -> Self {
        Self { data: None, error: Some(GENERIC_ERROR.to_string()), success: false }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// # Errors
    /// Returns the user-facing message when the request failed.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| GENERIC_ERROR.to_string())),
        }
    }
}
