//! Observed-curve synthesis
//!
//! Evaluates a [`DecayLaw`] over the horizon and optionally perturbs each
//! point with independent Gaussian noise of standard deviation
//! `noise_std · base_value`.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use twin_spi::{DecayLaw, ForecastParameters, Result, TimeSeries, TwinError};

use crate::law::CurveLaw;

/// Generates the observed series for one set of parameters.
pub struct CurveSynthesizer {
    law: Box<dyn DecayLaw>,
}

impl CurveSynthesizer {
    pub fn new(law: Box<dyn DecayLaw>) -> Self {
        Self { law }
    }

    /// Build from a serializable law selector.
    pub fn from_law(law: CurveLaw) -> Result<Self> {
        Ok(Self::new(law.build()?))
    }

    pub fn law_name(&self) -> &str {
        self.law.name()
    }

    /// Noise-free curve of exactly `horizon` points.
    pub fn synthesize_clean(&self, params: &ForecastParameters) -> Result<TimeSeries> {
        params.validate()?;
        self.law.validate(params)?;

        let values: Vec<f64> = (0..params.horizon)
            .map(|t| self.law.value_at(params, t as f64))
            .collect();

        if values.iter().any(|v| !v.is_finite()) {
            return Err(TwinError::NumericalError(format!(
                "{} law produced a non-finite value",
                self.law.name()
            )));
        }

        Ok(TimeSeries::from_values(values))
    }

    /// Curve of exactly `horizon` points with noise drawn from `rng`.
    ///
    /// The generator is left untouched when `noise_std` is zero.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        params: &ForecastParameters,
        rng: &mut R,
    ) -> Result<TimeSeries> {
        let clean = self.synthesize_clean(params)?;
        let mut values = clean.values();
        add_noise(&mut values, params.noise_sigma(), rng)?;

        debug!(
            law = self.law.name(),
            horizon = params.horizon,
            rate = params.effective_rate(),
            sigma = params.noise_sigma(),
            "synthesized observed curve"
        );

        Ok(TimeSeries::from_values(values))
    }
}

/// Add zero-mean Gaussian noise with standard deviation `sigma` in place.
pub fn add_noise<R: Rng + ?Sized>(values: &mut [f64], sigma: f64, rng: &mut R) -> Result<()> {
    if sigma == 0.0 {
        return Ok(());
    }

    let normal = Normal::new(0.0, sigma)
        .map_err(|e| TwinError::NumericalError(format!("noise distribution: {}", e)))?;

    for v in values.iter_mut() {
        *v += normal.sample(rng);
    }
    Ok(())
}
