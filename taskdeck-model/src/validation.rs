//! Structured error body returned by the API on rejected requests.
//!
//! Validation failures (HTTP 422) carry a field-to-messages map; other
//! rejections usually carry only `message`. Both fields are optional on the
//! wire, so a non-JSON or empty body degrades to [`ErrorBody::default`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name to ordered validation messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Body of a non-2xx API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable summary, if the server provided one.
    #[serde(default)]
    pub message: Option<String>,
    /// Field-level validation messages, present on 422 responses.
    #[serde(default)]
    pub errors: FieldErrors,
}

impl ErrorBody {
    /// Builds a body carrying only a summary message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: FieldErrors::new(),
        }
    }

    /// Builds a validation body with a summary and field errors.
    #[must_use]
    pub fn validation(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            message: Some(message.into()),
            errors,
        }
    }
}
