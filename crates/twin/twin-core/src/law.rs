//! Closed-form decay laws
//!
//! Each law maps `(params, t)` to a noise-free value.
//!
//! | Law        | Value at step t                                   |
//! |------------|---------------------------------------------------|
//! | Exponential| `base · e^(−k·s·t)`                               |
//! | Seasonal   | `base · e^(−k·s·t) · (1 + A·sin(2πt / P))`        |
//! | Suppressed | `base · e^(−k·s·(1 − r)·t)`                       |
//! | Linear     | `base + (target − base) · t / (horizon − 1)`      |
//!
//! where `k` is the decay coefficient, `s` the optional scale and `r` the
//! optional resistance.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use twin_spi::{DecayLaw, ForecastParameters, Result, TwinError};

/// Default seasonal cycle length in time steps (one year of months).
pub const DEFAULT_SEASONAL_PERIOD: f64 = 12.0;

/// Plain exponential decay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExponentialDecay;

impl DecayLaw for ExponentialDecay {
    fn value_at(&self, params: &ForecastParameters, t: f64) -> f64 {
        params.base_value * (-params.effective_rate() * t).exp()
    }

    fn name(&self) -> &str {
        "exponential"
    }
}

/// Exponential decay modulated by a sinusoidal season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalDecay {
    amplitude: f64,
    period: f64,
}

impl SeasonalDecay {
    /// Create a seasonal law.
    ///
    /// # Arguments
    ///
    /// * `amplitude` - Relative swing around the trend, in `[0, 1)`
    /// * `period` - Steps per seasonal cycle, positive
    pub fn new(amplitude: f64, period: f64) -> Result<Self> {
        if !amplitude.is_finite() || !(0.0..1.0).contains(&amplitude) {
            return Err(TwinError::invalid_parameter(
                "amplitude",
                format!("must be in [0, 1), got {}", amplitude),
            ));
        }
        if !period.is_finite() || period <= 0.0 {
            return Err(TwinError::invalid_parameter(
                "period",
                format!("must be positive, got {}", period),
            ));
        }
        Ok(Self { amplitude, period })
    }

    /// Monthly decay rate for a filter that removes `efficiency` of the
    /// pollutant over one year: `−ln(1 − efficiency) / 12`.
    pub fn rate_from_efficiency(efficiency: f64) -> Result<f64> {
        if !efficiency.is_finite() || !(0.0..1.0).contains(&efficiency) {
            return Err(TwinError::invalid_parameter(
                "efficiency",
                format!("must be in [0, 1), got {}", efficiency),
            ));
        }
        Ok(-(1.0 - efficiency).ln() / DEFAULT_SEASONAL_PERIOD)
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn period(&self) -> f64 {
        self.period
    }
}

impl DecayLaw for SeasonalDecay {
    fn value_at(&self, params: &ForecastParameters, t: f64) -> f64 {
        let trend = params.base_value * (-params.effective_rate() * t).exp();
        trend * (1.0 + self.amplitude * (2.0 * PI * t / self.period).sin())
    }

    fn name(&self) -> &str {
        "seasonal"
    }
}

/// Decay slowed by a suppression factor such as resistance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SuppressedDecay;

impl DecayLaw for SuppressedDecay {
    fn value_at(&self, params: &ForecastParameters, t: f64) -> f64 {
        params.base_value * (-params.suppressed_rate() * t).exp()
    }

    fn name(&self) -> &str {
        "suppressed"
    }
}

/// Straight line from the base value to a target at the last step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDecline {
    target: f64,
}

impl LinearDecline {
    pub fn new(target: f64) -> Result<Self> {
        if !target.is_finite() {
            return Err(TwinError::invalid_parameter("target", "must be finite"));
        }
        Ok(Self { target })
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

impl DecayLaw for LinearDecline {
    fn value_at(&self, params: &ForecastParameters, t: f64) -> f64 {
        if params.horizon <= 1 {
            return params.base_value;
        }
        let fraction = t / (params.horizon - 1) as f64;
        params.base_value + (self.target - params.base_value) * fraction
    }

    fn name(&self) -> &str {
        "linear"
    }
}

/// Serializable law selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveLaw {
    #[default]
    Exponential,
    Seasonal {
        amplitude: f64,
        #[serde(default = "default_period")]
        period: f64,
    },
    Suppressed,
    Linear {
        target: f64,
    },
}

fn default_period() -> f64 {
    DEFAULT_SEASONAL_PERIOD
}

impl CurveLaw {
    /// Instantiate the selected law, validating its settings.
    pub fn build(self) -> Result<Box<dyn DecayLaw>> {
        Ok(match self {
            CurveLaw::Exponential => Box::new(ExponentialDecay),
            CurveLaw::Seasonal { amplitude, period } => {
                Box::new(SeasonalDecay::new(amplitude, period)?)
            }
            CurveLaw::Suppressed => Box::new(SuppressedDecay),
            CurveLaw::Linear { target } => Box::new(LinearDecline::new(target)?),
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            CurveLaw::Exponential => "exponential",
            CurveLaw::Seasonal { .. } => "seasonal",
            CurveLaw::Suppressed => "suppressed",
            CurveLaw::Linear { .. } => "linear",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ForecastParameters {
        ForecastParameters::new(10, 100.0, 0.2, 0.0)
    }

    #[test]
    fn test_exponential_values() {
        let p = params();
        assert!((ExponentialDecay.value_at(&p, 0.0) - 100.0).abs() < 1e-12);
        let expected = 100.0 * (-1.8f64).exp();
        assert!((ExponentialDecay.value_at(&p, 9.0) - expected).abs() < 1e-10);
        assert!((expected - 16.53).abs() < 0.01);
    }

    #[test]
    fn test_exponential_uses_scale() {
        let p = params().with_scale(0.5);
        let expected = 100.0 * (-0.1f64 * 4.0).exp();
        assert!((ExponentialDecay.value_at(&p, 4.0) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_suppressed_malaria_example() {
        let p = ForecastParameters::new(16, 100.0, 0.2, 0.0).with_resistance(0.1);
        let v = SuppressedDecay.value_at(&p, 15.0);
        assert!((v - 100.0 * (-2.7f64).exp()).abs() < 1e-10);
        assert!((v - 6.72).abs() < 0.01);
    }

    #[test]
    fn test_seasonal_matches_trend_at_cycle_points() {
        let law = SeasonalDecay::new(0.3, 12.0).unwrap();
        let p = params();
        // sin(2πt/12) is zero at t = 0, 6, 12
        for t in [0.0, 6.0, 12.0] {
            let trend = ExponentialDecay.value_at(&p, t);
            assert!((law.value_at(&p, t) - trend).abs() < 1e-9);
        }
        // Peak of the season at t = 3
        let trend = ExponentialDecay.value_at(&p, 3.0);
        assert!((law.value_at(&p, 3.0) - trend * 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_seasonal_rejects_bad_settings() {
        assert!(SeasonalDecay::new(1.0, 12.0).is_err());
        assert!(SeasonalDecay::new(-0.1, 12.0).is_err());
        assert!(SeasonalDecay::new(0.1, 0.0).is_err());
    }

    #[test]
    fn test_rate_from_efficiency() {
        let rate = SeasonalDecay::rate_from_efficiency(0.5).unwrap();
        assert!((rate - 2f64.ln() / 12.0).abs() < 1e-12);
        // Twelve months at that rate remove exactly half
        assert!(((-rate * 12.0).exp() - 0.5).abs() < 1e-12);
        assert!(SeasonalDecay::rate_from_efficiency(1.0).is_err());
    }

    #[test]
    fn test_linear_endpoints() {
        let law = LinearDecline::new(40.0).unwrap();
        let p = ForecastParameters::new(12, 80.0, 0.0, 0.0);
        assert!((law.value_at(&p, 0.0) - 80.0).abs() < 1e-12);
        assert!((law.value_at(&p, 11.0) - 40.0).abs() < 1e-12);

        let single = ForecastParameters::new(1, 80.0, 0.0, 0.0);
        assert_eq!(law.value_at(&single, 0.0), 80.0);
    }

    #[test]
    fn test_curve_law_build() {
        assert_eq!(CurveLaw::Exponential.build().unwrap().name(), "exponential");
        assert_eq!(
            CurveLaw::Seasonal {
                amplitude: 0.1,
                period: 12.0
            }
            .build()
            .unwrap()
            .name(),
            "seasonal"
        );
        assert!(CurveLaw::Seasonal {
            amplitude: 2.0,
            period: 12.0
        }
        .build()
        .is_err());
        assert!(CurveLaw::Linear { target: f64::NAN }.build().is_err());
    }
}
