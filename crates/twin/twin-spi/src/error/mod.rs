//! Error module containing error types and result aliases

mod twin_error;

pub use twin_error::TwinError;

/// Result type for forecast operations
pub type Result<T> = std::result::Result<T, TwinError>;
