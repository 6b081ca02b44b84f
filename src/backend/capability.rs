//! Backend capability contract
//!
//! A backend is the concrete mechanism that checks a secret against an
//! authoritative store for one domain. The facade only ever sees this
//! boolean-returning contract.

use crate::error::BackendError;

/// Pluggable credential-checking capability.
///
/// Implementations decide pass/fail for one identity and secret.
/// Infrastructure failures must be reported as `BackendError::Unavailable`
/// rather than mapped to `Ok(false)`, so that an unreachable store is never
/// mistaken for bad credentials.
pub trait CredentialBackend {
    /// Check whether the secret is valid for the identity.
    fn check_credentials(&self, identity: &str, secret: &str) -> Result<bool, BackendError>;

    /// Human-readable name of this authentication method.
    fn label(&self) -> &str;
}
