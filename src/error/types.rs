//! Error types
//!
//! Defines domain-specific error types for the validation facade.

use std::fmt;

/// Errors surfaced by validator construction, dispatch, and validation.
///
/// `Clone` is required because a validator memoizes its first outcome,
/// including an error outcome, and replays it on later calls.
#[derive(Debug, Clone)]
pub enum ValidationError {
    MissingIdentity,
    MalformedInput(String),
    UnknownDomain(String),
    BackendUnavailable(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingIdentity => write!(f, "Identity is required"),
            ValidationError::MalformedInput(s) => write!(f, "Malformed input: {}", s),
            ValidationError::UnknownDomain(d) => {
                write!(f, "No backend registered for domain: {}", d)
            }
            ValidationError::BackendUnavailable(s) => write!(f, "Backend unavailable: {}", s),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised at the backend capability boundary
#[derive(Debug, Clone)]
pub enum BackendError {
    Unavailable(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Unavailable(s) => write!(f, "Backend unavailable: {}", s),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<BackendError> for ValidationError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Unavailable(s) => ValidationError::BackendUnavailable(s),
        }
    }
}
