//! Configuration errors

use twin_spi::TwinError;

/// Errors raised while loading or validating a [`TwinConfig`](crate::TwinConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Config parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid config: {0}")]
    Invalid(#[from] TwinError),
}
