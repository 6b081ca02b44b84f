pub mod backend;
pub mod config;
pub mod error;
pub mod registry;
pub mod validator;

pub use registry::BackendRegistry;
pub use validator::Validator;
