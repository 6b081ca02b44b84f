//! Backend capabilities
//!
//! Defines the pluggable credential-checking capability and the built-in
//! in-memory directory backend.

pub mod capability;
pub mod directory;

pub use capability::CredentialBackend;
pub use directory::StaticDirectoryBackend;
