//! Backend dispatcher
//!
//! Resolves an identity's domain suffix to a registered backend factory and
//! constructs the matching validator. Unknown suffixes fail deterministically;
//! there is no fallback backend.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::backend::StaticDirectoryBackend;
use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use crate::validator::{Hook, Validator};

/// Constructs a validator for one domain, given identity and secret.
pub type BackendFactory = Box<dyn Fn(&str, &str) -> Result<Validator, ValidationError>>;

/// Performs basic input sanitation on presented identities and secrets.
fn is_sane_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty() && input.len() <= max_length && !input.contains(['\r', '\n', '\0'])
}

/// Registry mapping lower-cased domain suffixes to backend factories.
///
/// Populated once at startup (from configuration or explicit registration)
/// and read-only afterwards. Adding a backend means adding an entry, not
/// modifying dispatch code.
pub struct BackendRegistry {
    factories: HashMap<String, BackendFactory>,
    max_identity_length: usize,
    max_secret_length: usize,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            max_identity_length: 128,
            max_secret_length: 256,
        }
    }

    /// Builds a registry from configuration, instantiating the built-in
    /// backend kinds for each configured domain suffix.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, config::ConfigError> {
        let mut registry = Self::new();
        registry.max_identity_length = config.max_identity_length;
        registry.max_secret_length = config.max_secret_length;

        let accounts = Arc::new(config.accounts.clone());

        for (suffix, kind) in &config.backends {
            match kind.as_str() {
                "directory" => {
                    let label = format!("{} directory", suffix.to_ascii_lowercase());
                    let accounts = Arc::clone(&accounts);
                    registry.register(
                        suffix,
                        Box::new(move |identity, secret| {
                            Validator::with_backend(
                                identity,
                                secret,
                                Box::new(StaticDirectoryBackend::new(
                                    label.clone(),
                                    Arc::clone(&accounts),
                                )),
                            )
                        }),
                    );
                }
                other => {
                    return Err(config::ConfigError::Message(format!(
                        "unknown backend kind '{}' for domain '{}'",
                        other, suffix
                    )));
                }
            }
        }

        Ok(registry)
    }

    /// Registers a factory for a domain suffix (matched case-insensitively).
    pub fn register(&mut self, suffix: &str, factory: BackendFactory) {
        self.factories.insert(suffix.to_ascii_lowercase(), factory);
    }

    /// Creates an always-valid placeholder for an identity with no secret.
    pub fn create_placeholder(&self, identity: &str) -> Result<Validator, ValidationError> {
        Validator::ad_hoc(identity)
    }

    /// Creates a validator for the identity's domain backend.
    ///
    /// Never validates eagerly; the returned validator runs its check on the
    /// first `validate()` call.
    pub fn create_validator(
        &self,
        identity: &str,
        secret: &str,
    ) -> Result<Validator, ValidationError> {
        if identity.is_empty() {
            return Err(ValidationError::MissingIdentity);
        }
        if !is_sane_input(identity, self.max_identity_length) {
            return Err(ValidationError::MalformedInput("invalid identity format".into()));
        }
        if !is_sane_input(secret, self.max_secret_length) {
            return Err(ValidationError::MalformedInput("invalid secret format".into()));
        }

        let suffix = identity
            .rsplit('@')
            .next()
            .unwrap_or(identity)
            .to_ascii_lowercase();

        let factory = self
            .factories
            .get(&suffix)
            .ok_or_else(|| ValidationError::UnknownDomain(suffix.clone()))?;

        debug!("dispatching '{}' to domain '{}'", identity, suffix);
        factory(identity, secret)
    }

    /// As [`create_validator`](Self::create_validator), with optional hooks
    /// appended to the new validator.
    pub fn create_validator_with_hooks(
        &self,
        identity: &str,
        secret: &str,
        on_success: Option<Hook>,
        on_failure: Option<Hook>,
    ) -> Result<Validator, ValidationError> {
        let mut validator = self.create_validator(identity, secret)?;
        if let Some(hook) = on_success {
            validator.on_success(hook);
        }
        if let Some(hook) = on_failure {
            validator.on_failure(hook);
        }
        Ok(validator)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn test_config() -> ValidatorConfig {
        ValidatorConfig {
            max_identity_length: 128,
            max_secret_length: 256,
            backends: HashMap::from([("okstate.edu".to_string(), "directory".to_string())]),
            accounts: HashMap::from([(
                "alice@okstate.edu".to_string(),
                "alice123".to_string(),
            )]),
        }
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        let registry = BackendRegistry::from_config(&test_config()).unwrap();

        let mut upper = registry
            .create_validator("alice@OKSTATE.EDU", "alice123")
            .unwrap();
        let mut lower = registry
            .create_validator("alice@okstate.edu", "alice123")
            .unwrap();

        assert_eq!(upper.method_label(), lower.method_label());
        // The account store is keyed by the exact identity string.
        assert!(lower.validate().unwrap());
        assert!(!upper.validate().unwrap());
    }

    #[test]
    fn test_unknown_domain_rejected() {
        let registry = BackendRegistry::from_config(&test_config()).unwrap();
        assert!(matches!(
            registry.create_validator("alice@unknown.tld", "pw"),
            Err(ValidationError::UnknownDomain(d)) if d == "unknown.tld"
        ));
    }

    #[test]
    fn test_empty_identity_rejected_before_dispatch() {
        let registry = BackendRegistry::from_config(&test_config()).unwrap();
        assert!(matches!(
            registry.create_validator("", "pw"),
            Err(ValidationError::MissingIdentity)
        ));
        assert!(matches!(
            registry.create_placeholder(""),
            Err(ValidationError::MissingIdentity)
        ));
    }

    #[test]
    fn test_malformed_input_rejected() {
        let registry = BackendRegistry::from_config(&test_config()).unwrap();
        assert!(matches!(
            registry.create_validator("alice\r\n@okstate.edu", "pw"),
            Err(ValidationError::MalformedInput(_))
        ));
        assert!(matches!(
            registry.create_validator("alice@okstate.edu", "pw\0"),
            Err(ValidationError::MalformedInput(_))
        ));
        let long_identity = format!("{}@okstate.edu", "a".repeat(200));
        assert!(matches!(
            registry.create_validator(&long_identity, "pw"),
            Err(ValidationError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_identity_without_at_uses_whole_string_as_domain() {
        let registry = BackendRegistry::from_config(&test_config()).unwrap();
        assert!(matches!(
            registry.create_validator("alice", "pw"),
            Err(ValidationError::UnknownDomain(d)) if d == "alice"
        ));
    }

    #[test]
    fn test_dispatch_is_lazy() {
        let registry = BackendRegistry::from_config(&test_config()).unwrap();
        let v = registry
            .create_validator("alice@okstate.edu", "wrong")
            .unwrap();
        // No validation has happened yet.
        assert_eq!(v.to_string(), "alice@okstate.edu has not been validated yet.");
    }

    #[test]
    fn test_hooks_attached_at_dispatch() {
        let registry = BackendRegistry::from_config(&test_config()).unwrap();
        let succeeded = Rc::new(Cell::new(0));
        let failed = Rc::new(Cell::new(0));

        let s = Rc::clone(&succeeded);
        let f = Rc::clone(&failed);
        let mut v = registry
            .create_validator_with_hooks(
                "alice@okstate.edu",
                "alice123",
                Some(Box::new(move || s.set(s.get() + 1))),
                Some(Box::new(move || f.set(f.get() + 1))),
            )
            .unwrap();

        assert!(v.validate().unwrap());
        assert_eq!(succeeded.get(), 1);
        assert_eq!(failed.get(), 0);
    }

    #[test]
    fn test_placeholder_is_always_valid() {
        let registry = BackendRegistry::new();
        let mut v = registry.create_placeholder("guest@anywhere.example").unwrap();
        assert_eq!(v.method_label(), "ad-hoc");
        assert!(v.validate().unwrap());
    }

    #[test]
    fn test_unknown_backend_kind_is_config_error() {
        let mut config = test_config();
        config
            .backends
            .insert("example.org".to_string(), "kerberos".to_string());
        assert!(BackendRegistry::from_config(&config).is_err());
    }

    #[test]
    fn test_registered_suffix_is_normalized() {
        let mut registry = BackendRegistry::new();
        registry.register(
            "EXAMPLE.ORG",
            Box::new(|identity, _secret| Validator::ad_hoc(identity)),
        );
        assert!(registry.create_validator("bob@example.org", "pw").is_ok());
    }
}
