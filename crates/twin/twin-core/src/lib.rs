//! Twin Core
//!
//! Core implementations for environmental forecast generation:
//!
//! - [`law`]: closed-form decay laws (exponential, seasonal, suppressed, linear)
//! - [`synthesis`]: observed-curve synthesis with seeded Gaussian noise
//! - [`smoothing`]: polynomial, tree-ensemble, and kernel regression smoothers
//! - [`ingest`]: external table parsing and resampling
//! - [`generator`]: the unified forecast function
//! - [`scenario`]: the three-domain parameter sets
//! - [`summary`]: CSV export

pub mod generator;
pub mod ingest;
pub mod law;
pub mod scenario;
pub mod smoothing;
pub mod summary;
pub mod synthesis;

// Re-export SPI types for implementations
pub use twin_spi::{
    DecayLaw, Domain, ExternalTable, FitQuality, ForecastParameters, ForecastResult, Point,
    Result, Smoother, SummaryRow, TimeSeries, TwinError, MAX_HORIZON,
};

// Re-export main types
pub use generator::ForecastGenerator;
pub use ingest::{read_table, read_table_file, resample};
pub use law::{CurveLaw, ExponentialDecay, LinearDecline, SeasonalDecay, SuppressedDecay};
pub use scenario::{
    intervention_coefficient, DomainForecast, FieldSettings, InterventionSettings, ScriptScenario,
};
pub use smoothing::{
    ForestSmoother, IdentitySmoother, KernelSmoother, PolynomialSmoother, SmootherKind,
    SmootherSettings,
};
pub use summary::{
    default_summary, series_file_name, write_series, write_summary, SUMMARY_FILE_NAME,
};
pub use synthesis::CurveSynthesizer;
