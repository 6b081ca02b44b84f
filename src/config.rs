//! Configuration for the credential validation facade
//!
//! Loaded once at process start; the backend registry is built from it and
//! is read-only afterwards.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Facade configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ValidatorConfig {
    /// Input sanitation limit for presented identities
    pub max_identity_length: usize,

    /// Input sanitation limit for presented secrets
    pub max_secret_length: usize,

    /// Domain suffix -> backend kind (built-in kind: "directory")
    pub backends: HashMap<String, String>,

    /// Accounts served by the "directory" backend kind, keyed by full identity
    #[serde(default)]
    pub accounts: HashMap<String, String>,
}

impl ValidatorConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the named file with environment overrides
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("CRED_GATE").separator("_"))
            .build()?;

        let config: ValidatorConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_identity_length == 0 {
            return Err(ConfigError::Message(
                "max_identity_length must be greater than 0".into(),
            ));
        }

        if self.max_secret_length == 0 {
            return Err(ConfigError::Message(
                "max_secret_length must be greater than 0".into(),
            ));
        }

        if self.backends.is_empty() {
            return Err(ConfigError::Message(
                "at least one backend domain must be configured".into(),
            ));
        }

        Ok(())
    }
}
