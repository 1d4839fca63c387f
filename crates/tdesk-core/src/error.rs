//! # Validation Errors
//!
//! Errors raised while constructing domain primitives from untrusted
//! input, built with `thiserror`. Lifecycle errors live next to the
//! state machines that raise them, in `tdesk-state`.

use thiserror::Error;

/// Errors validating domain primitives at construction.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A travel mode string did not match any known mode.
    #[error("unknown travel mode: {0:?}")]
    UnknownTravelMode(String),

    /// A role string did not match any known role.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    /// A calendar date string could not be parsed (expected YYYY-MM-DD).
    #[error("invalid calendar date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// A timestamp string was malformed or not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A required free-text field was empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// The offending field name.
        field: &'static str,
    },

    /// A field exceeded its length limit.
    #[error("{field} must not exceed {max} characters")]
    TooLong {
        /// The offending field name.
        field: &'static str,
        /// Maximum permitted length.
        max: usize,
    },
}
