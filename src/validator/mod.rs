//! Credential validators
//!
//! Implements the validator contract: one identity plus one authentication
//! method, with validate-once-and-memoize semantics, notification hooks, and
//! AND-composition of independent checks.
//!
//! Validators are single-threaded by design. Hooks are `Box<dyn FnMut()>`,
//! so a `Validator` is neither `Send` nor `Sync`; sharing one across threads
//! is rejected by the compiler rather than left as a caller obligation.

pub mod aggregate;
pub mod core;

pub use core::{Hook, Validator};
