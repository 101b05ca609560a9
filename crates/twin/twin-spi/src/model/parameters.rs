//! Forecast parameters

use serde::{Deserialize, Serialize};

use crate::error::{Result, TwinError};

/// Upper bound for the optional rate multiplier.
pub const MAX_SCALE: f64 = 10.0;

/// Largest number of time steps one curve may have.
pub const MAX_HORIZON: usize = 10_000;

/// Scalar inputs for one synthesized curve.
///
/// Invariants (checked by [`ForecastParameters::validate`]):
/// - `0 < horizon <= MAX_HORIZON`
/// - `base_value > 0`
/// - `decay_coefficient >= 0`, `noise_std >= 0`
/// - `scale` in `(0, 10]`, `resistance` in `[0, 1)` when present
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastParameters {
    /// Number of time steps
    pub horizon: usize,
    /// Value at t = 0
    pub base_value: f64,
    /// Rate constant per time step
    pub decay_coefficient: f64,
    /// Noise standard deviation as a fraction of `base_value`
    pub noise_std: f64,
    /// Multiplier on the decay rate (impact scale, ocean temperature)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Fraction of the rate cancelled by a suppression factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<f64>,
}

impl ForecastParameters {
    /// Create parameters with no modifiers.
    pub fn new(horizon: usize, base_value: f64, decay_coefficient: f64, noise_std: f64) -> Self {
        Self {
            horizon,
            base_value,
            decay_coefficient,
            noise_std,
            scale: None,
            resistance: None,
        }
    }

    /// Set the rate multiplier.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set the suppression factor.
    pub fn with_resistance(mut self, resistance: f64) -> Self {
        self.resistance = Some(resistance);
        self
    }

    /// Disable noise.
    pub fn without_noise(mut self) -> Self {
        self.noise_std = 0.0;
        self
    }

    /// Decay rate after applying `scale`.
    pub fn effective_rate(&self) -> f64 {
        self.decay_coefficient * self.scale.unwrap_or(1.0)
    }

    /// Decay rate after applying both `scale` and `resistance`.
    pub fn suppressed_rate(&self) -> f64 {
        self.effective_rate() * (1.0 - self.resistance.unwrap_or(0.0))
    }

    /// Absolute noise standard deviation.
    pub fn noise_sigma(&self) -> f64 {
        self.noise_std * self.base_value
    }

    /// Reject parameters that cannot produce a curve.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(TwinError::invalid_parameter("horizon", "must be positive"));
        }
        if self.horizon > MAX_HORIZON {
            return Err(TwinError::invalid_parameter(
                "horizon",
                format!("must be at most {}, got {}", MAX_HORIZON, self.horizon),
            ));
        }
        if !self.base_value.is_finite() || self.base_value <= 0.0 {
            return Err(TwinError::invalid_parameter(
                "base_value",
                format!("must be positive and finite, got {}", self.base_value),
            ));
        }
        if !self.decay_coefficient.is_finite() || self.decay_coefficient < 0.0 {
            return Err(TwinError::invalid_parameter(
                "decay_coefficient",
                format!("must be non-negative and finite, got {}", self.decay_coefficient),
            ));
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(TwinError::invalid_parameter(
                "noise_std",
                format!("must be non-negative and finite, got {}", self.noise_std),
            ));
        }
        if let Some(scale) = self.scale {
            if !scale.is_finite() || scale <= 0.0 || scale > MAX_SCALE {
                return Err(TwinError::invalid_parameter(
                    "scale",
                    format!("must be in (0, {}], got {}", MAX_SCALE, scale),
                ));
            }
        }
        if let Some(resistance) = self.resistance {
            if !resistance.is_finite() || !(0.0..1.0).contains(&resistance) {
                return Err(TwinError::invalid_parameter(
                    "resistance",
                    format!("must be in [0, 1), got {}", resistance),
                ));
            }
        }
        Ok(())
    }
}
