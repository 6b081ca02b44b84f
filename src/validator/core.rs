//! Validator core
//!
//! Defines the `Validator` type and its memoized validation lifecycle.

use std::fmt;

use log::{debug, warn};

use crate::backend::CredentialBackend;
use crate::error::ValidationError;

/// Zero-argument notification hook, fired when a validation outcome settles.
pub type Hook = Box<dyn FnMut()>;

/// Fixed message reported by a passing aggregate.
pub(crate) const AGGREGATE_VALID_MESSAGE: &str = "Credentials are valid";

/// One pending-or-resolved authentication check.
///
/// A validator wraps a single identity and authentication method, runs its
/// underlying check at most once, and replays the memoized outcome on every
/// later call. Success/failure hooks fire exactly once, at the moment the
/// outcome first settles.
pub struct Validator {
    pub(crate) identity: String,
    pub(crate) method_label: String,
    pub(crate) kind: ValidatorKind,
    pub(crate) cached: Option<Result<bool, ValidationError>>,
    pub(crate) success_hooks: Vec<Hook>,
    pub(crate) failure_hooks: Vec<Hook>,
}

/// Concrete behavior behind a validator.
pub(crate) enum ValidatorKind {
    /// Always-valid placeholder for identities presented without a secret.
    AdHoc,
    /// Delegates to a domain backend with the secret captured at dispatch.
    Backend {
        backend: Box<dyn CredentialBackend>,
        secret: String,
    },
    /// AND-composition over owned children.
    Aggregate(Vec<Validator>),
}

impl Validator {
    /// Creates an always-valid placeholder for an identity with no secret.
    pub fn ad_hoc(identity: &str) -> Result<Self, ValidationError> {
        Self::leaf(identity, "ad-hoc", ValidatorKind::AdHoc)
    }

    /// Creates a validator that defers to the given backend capability.
    pub fn with_backend(
        identity: &str,
        secret: &str,
        backend: Box<dyn CredentialBackend>,
    ) -> Result<Self, ValidationError> {
        let label = backend.label().to_string();
        Self::leaf(
            identity,
            &label,
            ValidatorKind::Backend {
                backend,
                secret: secret.to_string(),
            },
        )
    }

    pub(crate) fn leaf(
        identity: &str,
        label: &str,
        kind: ValidatorKind,
    ) -> Result<Self, ValidationError> {
        if identity.is_empty() {
            return Err(ValidationError::MissingIdentity);
        }
        if label.is_empty() {
            return Err(ValidationError::MalformedInput(
                "method label is required".into(),
            ));
        }

        Ok(Self {
            identity: identity.to_string(),
            method_label: label.to_string(),
            kind,
            cached: None,
            success_hooks: Vec::new(),
            failure_hooks: Vec::new(),
        })
    }

    /// Returns the presented identity.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the authentication method label.
    ///
    /// For an aggregate this is the newline-joined labels of its children.
    pub fn method_label(&self) -> &str {
        &self.method_label
    }

    /// Appends a hook fired once if validation settles as successful.
    ///
    /// Hook lists are append-only; there is no removal.
    pub fn on_success(&mut self, hook: Hook) {
        self.success_hooks.push(hook);
    }

    /// Appends a hook fired once if validation settles as failed.
    pub fn on_failure(&mut self, hook: Hook) {
        self.failure_hooks.push(hook);
    }

    /// Runs the check once and memoizes the outcome.
    ///
    /// The first call invokes the underlying check, stores the outcome
    /// (boolean or backend error), and fires the matching hook list in
    /// registration order. Every later call replays the stored outcome
    /// without touching the backend; a validator never retries, so callers
    /// wanting a fresh attempt must construct a new one.
    pub fn validate(&mut self) -> Result<bool, ValidationError> {
        if let Some(outcome) = &self.cached {
            return outcome.clone();
        }

        let outcome = self.evaluate_raw();
        self.cached = Some(outcome.clone());

        match &outcome {
            Ok(passed) => {
                debug!("validated '{}': {}", self.identity, passed);
                let hooks = if *passed {
                    &mut self.success_hooks
                } else {
                    &mut self.failure_hooks
                };
                for hook in hooks.iter_mut() {
                    hook();
                }
            }
            Err(e) => warn!("validation for '{}' did not complete: {}", self.identity, e),
        }

        outcome
    }

    /// Alias for [`validate`](Self::validate), with identical side effects.
    pub fn is_valid(&mut self) -> Result<bool, ValidationError> {
        self.validate()
    }

    /// Runs the underlying check, bypassing the memoized outcome.
    ///
    /// This never fires hooks and never updates this validator's own cache.
    /// An aggregate re-runs every child's raw check through this path,
    /// refreshing each evaluated child's cache as it goes so the failure
    /// report reads settled child outcomes.
    pub fn evaluate_raw(&mut self) -> Result<bool, ValidationError> {
        match &mut self.kind {
            ValidatorKind::AdHoc => Ok(true),
            ValidatorKind::Backend { backend, secret } => {
                Ok(backend.check_credentials(&self.identity, secret)?)
            }
            ValidatorKind::Aggregate(children) => {
                for child in children.iter_mut() {
                    let outcome = child.evaluate_raw();
                    child.cached = Some(outcome.clone());
                    if !outcome? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    /// Human-readable report of the (memoized) validation outcome.
    ///
    /// Triggers validation if it has not happened yet. A failing aggregate
    /// reports one line per failed child, prefixed with that child's method
    /// label.
    pub fn validation_message(&mut self) -> String {
        let outcome = self.validate();

        // Settle any child skipped by the short-circuiting raw pass so the
        // failure report covers every child.
        if !matches!(outcome, Ok(true)) {
            if let ValidatorKind::Aggregate(children) = &mut self.kind {
                for child in children.iter_mut() {
                    let _ = child.validate();
                }
            }
        }

        self.message_for(&outcome)
    }

    fn message_for(&self, outcome: &Result<bool, ValidationError>) -> String {
        match &self.kind {
            ValidatorKind::AdHoc => default_message(&self.identity, outcome),
            ValidatorKind::Backend { .. } => match outcome {
                Ok(false) => "That username/password combination is not valid.".to_string(),
                _ => default_message(&self.identity, outcome),
            },
            ValidatorKind::Aggregate(children) => match outcome {
                Ok(true) => AGGREGATE_VALID_MESSAGE.to_string(),
                _ => {
                    let mut report = String::new();
                    for child in children {
                        match &child.cached {
                            Some(Ok(true)) | None => continue,
                            Some(child_outcome) => {
                                report.push_str(&format!(
                                    "{}: {}\n",
                                    child.method_label,
                                    child.message_for(child_outcome)
                                ));
                            }
                        }
                    }
                    report
                }
            },
        }
    }
}

fn default_message(identity: &str, outcome: &Result<bool, ValidationError>) -> String {
    match outcome {
        Ok(valid) => format!(
            "{} submitted {} credentials.",
            identity,
            if *valid { "valid" } else { "invalid" }
        ),
        Err(e) => format!("{} could not be validated: {}", identity, e),
    }
}

/// Read-only snapshot of the validation message.
///
/// `Display` takes `&self`, so it cannot trigger validation; it renders from
/// the memoized outcome when one exists. Use
/// [`validation_message`](Validator::validation_message) for the validating
/// accessor.
impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cached {
            Some(outcome) => f.write_str(&self.message_for(outcome)),
            None => write!(f, "{} has not been validated yet.", self.identity),
        }
    }
}
