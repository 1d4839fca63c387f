//! # Body Extraction & Field Validation
//!
//! JSON body extraction plus per-field validation for request DTOs.
//! Validation collects every failing field in one pass, so a client
//! fixing a bad submission sees all problems at once instead of
//! resubmitting field by field. Issues surface as a 422 with the
//! field paths in the error `details`.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One failing field in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Field path in the request body, e.g. `"origin"`.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Per-field validation of a request DTO, run after deserialization.
///
/// Return every failing field; an empty vec means the body is good.
pub trait Validate {
    fn issues(&self) -> Vec<FieldIssue>;
}

/// A mandatory free-text field: whitespace-only counts as empty.
pub fn require_text(field: &'static str, value: &str) -> Option<FieldIssue> {
    if value.trim().is_empty() {
        Some(FieldIssue::new(field, "must not be empty"))
    } else {
        None
    }
}

/// A mandatory email field. Deliberately shallow: presence and an `@`,
/// nothing RFC-grade.
pub fn require_email(field: &'static str, value: &str) -> Option<FieldIssue> {
    if value.trim().is_empty() || !value.contains('@') {
        Some(FieldIssue::new(field, "must be a valid email address"))
    } else {
        None
    }
}

/// Extract a JSON body, mapping deserialization errors to
/// [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and run its [`Validate`] checks.
///
/// A malformed body is a 400; a well-formed body with failing fields is
/// a 422 carrying every [`FieldIssue`].
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    let issues = value.issues();
    if issues.is_empty() {
        Ok(value)
    } else {
        Err(AppError::Invalid(issues))
    }
}
