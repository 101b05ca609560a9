//! Twin Facade
//!
//! High-level API for environmental forecasts. Re-exports the public types
//! of the twin stack for convenient usage.
//!
//! # Example
//!
//! ```rust
//! use twin_facade::prelude::*;
//! use rand::SeedableRng;
//!
//! let settings = InterventionSettings::default();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let forecasts = settings
//!     .run(&SmootherSettings::default(), None, &mut rng)
//!     .unwrap();
//! assert_eq!(forecasts.len(), 3);
//! ```

// Re-export everything from core (includes SPI types)
pub use twin_core::*;

// Configuration and builders
pub use twin_api::{
    CliOverrides, ConfigError, ForecastParametersBuilder, OutputConfig, TwinConfig, ENV_MODEL,
    ENV_SEED,
};

// Contracts and metrics from the SPI
pub use twin_spi::{check_smoothing_input, model, MIN_SMOOTHING_POINTS};

/// Commonly used types.
pub mod prelude {
    pub use twin_api::{ForecastParametersBuilder, TwinConfig};
    pub use twin_core::{
        CurveLaw, CurveSynthesizer, DecayLaw, Domain, DomainForecast, ExternalTable,
        FieldSettings, ForecastGenerator, ForecastParameters, ForecastResult,
        InterventionSettings, Result, ScriptScenario, Smoother, SmootherKind, SmootherSettings,
        TimeSeries, TwinError,
    };
}
