//! Backend registry and dispatch
//!
//! Maps domain suffixes to validator factories and dispatches identities to
//! the right backend.

pub mod dispatcher;

pub use dispatcher::{BackendFactory, BackendRegistry};
