//! Twin Consumer API
//!
//! Configuration and builders layered over [`twin_core`]:
//!
//! - [`TwinConfig`]: TOML configuration with environment and CLI overrides
//! - [`ForecastParametersBuilder`]: fluent construction of single-curve inputs
//! - [`ConfigError`]: configuration loading failures

pub mod builder;
pub mod config;
pub mod error;

pub use builder::ForecastParametersBuilder;
pub use config::{CliOverrides, OutputConfig, TwinConfig, ENV_MODEL, ENV_SEED};
pub use error::ConfigError;

// Re-export SPI types
pub use twin_spi::{ForecastParameters, Result, TwinError};
