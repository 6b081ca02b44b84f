//! Error handlers
//!
//! Provides error reporting helpers for the binary front-end.

use crate::error::types::ValidationError;
use log::error;

/// Log a validation error
pub fn handle_error(err: &ValidationError) {
    error!("Validation error: {}", err);
}

/// Convert an error to a process exit code
pub fn error_to_exit_code(err: &ValidationError) -> i32 {
    match err {
        ValidationError::MissingIdentity => 2,
        ValidationError::MalformedInput(_) => 2,
        ValidationError::UnknownDomain(_) => 3,
        ValidationError::BackendUnavailable(_) => 4,
    }
}
