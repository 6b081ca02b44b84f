//! In-memory directory backend
//!
//! Serves credential checks from a static account store - in production a
//! domain would typically be backed by a real directory service instead.

use std::collections::HashMap;
use std::sync::Arc;

use super::capability::CredentialBackend;
use crate::error::BackendError;

/// Backend that answers checks from a fixed identity -> secret map.
///
/// The store is shared (`Arc`) so that several validators dispatched for the
/// same domain read the same accounts without copying them.
pub struct StaticDirectoryBackend {
    label: String,
    accounts: Arc<HashMap<String, String>>,
}

impl StaticDirectoryBackend {
    pub fn new(label: impl Into<String>, accounts: Arc<HashMap<String, String>>) -> Self {
        Self {
            label: label.into(),
            accounts,
        }
    }
}

impl CredentialBackend for StaticDirectoryBackend {
    fn check_credentials(&self, identity: &str, secret: &str) -> Result<bool, BackendError> {
        match self.accounts.get(identity) {
            Some(stored) => Ok(stored == secret),
            None => Ok(false),
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> StaticDirectoryBackend {
        let accounts = Arc::new(HashMap::from([(
            "alice@okstate.edu".to_string(),
            "alice123".to_string(),
        )]));
        StaticDirectoryBackend::new("okstate.edu directory", accounts)
    }

    #[test]
    fn test_matching_secret_passes() {
        let b = backend();
        assert!(b.check_credentials("alice@okstate.edu", "alice123").unwrap());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let b = backend();
        assert!(!b.check_credentials("alice@okstate.edu", "nope").unwrap());
    }

    #[test]
    fn test_unknown_identity_fails() {
        let b = backend();
        assert!(!b.check_credentials("carol@okstate.edu", "alice123").unwrap());
    }

    #[test]
    fn test_label() {
        assert_eq!(backend().label(), "okstate.edu directory");
    }
}
