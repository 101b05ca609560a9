//! Builder for single-curve forecast parameters.

use twin_spi::{ForecastParameters, Result, TwinError};

/// Fluent construction of [`ForecastParameters`].
///
/// `horizon` and `base_value` are required. The decay coefficient and noise
/// default to zero; `scale` and `resistance` are unset unless given.
///
/// # Example
///
/// ```rust
/// use twin_api::ForecastParametersBuilder;
///
/// let params = ForecastParametersBuilder::new()
///     .horizon(10)
///     .base_value(100.0)
///     .decay_coefficient(0.2)
///     .build()
///     .unwrap();
/// assert_eq!(params.horizon, 10);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ForecastParametersBuilder {
    horizon: Option<usize>,
    base_value: Option<f64>,
    decay_coefficient: Option<f64>,
    noise_std: Option<f64>,
    scale: Option<f64>,
    resistance: Option<f64>,
}

impl ForecastParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }

    pub fn base_value(mut self, base_value: f64) -> Self {
        self.base_value = Some(base_value);
        self
    }

    pub fn decay_coefficient(mut self, decay_coefficient: f64) -> Self {
        self.decay_coefficient = Some(decay_coefficient);
        self
    }

    pub fn noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = Some(noise_std);
        self
    }

    /// Set the rate multiplier; `None` leaves it unset.
    pub fn scale(mut self, scale: Option<f64>) -> Self {
        self.scale = scale;
        self
    }

    /// Set the suppression factor; `None` leaves it unset.
    pub fn resistance(mut self, resistance: Option<f64>) -> Self {
        self.resistance = resistance;
        self
    }

    /// Build and validate.
    pub fn build(self) -> Result<ForecastParameters> {
        let horizon = self
            .horizon
            .ok_or_else(|| TwinError::invalid_parameter("horizon", "is required"))?;
        let base_value = self
            .base_value
            .ok_or_else(|| TwinError::invalid_parameter("base_value", "is required"))?;

        let params = ForecastParameters {
            horizon,
            base_value,
            decay_coefficient: self.decay_coefficient.unwrap_or(0.0),
            noise_std: self.noise_std.unwrap_or(0.0),
            scale: self.scale,
            resistance: self.resistance,
        };
        params.validate()?;
        Ok(params)
    }
}
