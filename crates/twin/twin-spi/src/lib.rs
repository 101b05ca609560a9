//! Twin Service Provider Interface
//!
//! Defines the data model, error type, and extension traits shared by every
//! ecotwin crate:
//!
//! - [`DecayLaw`]: closed-form curve used to synthesize an observed series
//! - [`Smoother`]: regression strategy producing a same-length prediction
//! - [`TwinError`]: standardized error type for all forecast operations
//! - [`Result`]: convenient result type alias

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{check_smoothing_input, DecayLaw, Smoother, MIN_SMOOTHING_POINTS};
pub use error::{Result, TwinError};
pub use model::{
    Domain, ExternalTable, FitQuality, ForecastParameters, ForecastResult, Point, SummaryRow,
    TimeSeries, MAX_HORIZON,
};
