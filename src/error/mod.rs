//! Error handling
//!
//! Defines error types and handling for the credential validation facade.

pub mod handlers;
pub mod types;

pub use types::*;
