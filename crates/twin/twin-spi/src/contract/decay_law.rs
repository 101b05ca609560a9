//! Closed-form decay law trait

use crate::error::Result;
use crate::model::ForecastParameters;

/// Closed-form curve used to synthesize an observed series.
///
/// Implementations are pure: the same parameters and time step always give
/// the same value. Noise is added by the synthesizer, never by the law.
///
/// # Example
///
/// ```rust,ignore
/// use twin_spi::{DecayLaw, ForecastParameters};
///
/// fn curve<L: DecayLaw>(law: &L, params: &ForecastParameters) -> Vec<f64> {
///     (0..params.horizon).map(|t| law.value_at(params, t as f64)).collect()
/// }
/// ```
pub trait DecayLaw: Send + Sync {
    /// Noise-free value at time step `t`.
    fn value_at(&self, params: &ForecastParameters, t: f64) -> f64;

    /// Check law-specific settings. Called after the parameters themselves
    /// have been validated.
    fn validate(&self, _params: &ForecastParameters) -> Result<()> {
        Ok(())
    }

    /// Short identifier used in logs and exports
    fn name(&self) -> &str;
}
