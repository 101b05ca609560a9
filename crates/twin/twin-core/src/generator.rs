//! Unified forecast function
//!
//! Couples a [`CurveSynthesizer`] with a [`Smoother`]: synthesize (or
//! ingest) the observed curve, then fit the prediction to it.

use rand::Rng;
use tracing::debug;

use twin_spi::{
    ExternalTable, ForecastParameters, ForecastResult, Result, Smoother, TimeSeries,
};

use crate::ingest::resample;
use crate::law::CurveLaw;
use crate::smoothing::SmootherSettings;
use crate::synthesis::{add_noise, CurveSynthesizer};

/// Produces an observed/predicted pair for one domain.
pub struct ForecastGenerator {
    synthesizer: CurveSynthesizer,
    smoother: Box<dyn Smoother>,
}

impl ForecastGenerator {
    pub fn new(synthesizer: CurveSynthesizer, smoother: Box<dyn Smoother>) -> Self {
        Self {
            synthesizer,
            smoother,
        }
    }

    /// Build from serializable selectors.
    pub fn from_settings(law: CurveLaw, smoother: &SmootherSettings) -> Result<Self> {
        Ok(Self::new(CurveSynthesizer::from_law(law)?, smoother.build()?))
    }

    pub fn smoother_name(&self) -> &str {
        self.smoother.name()
    }

    pub fn law_name(&self) -> &str {
        self.synthesizer.law_name()
    }

    /// Synthesize the observed curve from `params` and smooth it.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        params: &ForecastParameters,
        rng: &mut R,
    ) -> Result<ForecastResult> {
        let observed = self.synthesizer.synthesize(params, rng)?;
        self.fit(observed)
    }

    /// Smooth the noise-free curve for `params`.
    pub fn generate_clean(&self, params: &ForecastParameters) -> Result<ForecastResult> {
        let observed = self.synthesizer.synthesize_clean(params)?;
        self.fit(observed)
    }

    /// Use an uploaded table as the clean curve, then add noise and smooth.
    ///
    /// The table is resampled to `params.horizon`; the decay settings in
    /// `params` are not used.
    pub fn generate_from_table<R: Rng + ?Sized>(
        &self,
        params: &ForecastParameters,
        table: &ExternalTable,
        rng: &mut R,
    ) -> Result<ForecastResult> {
        params.validate()?;
        let mut values = resample(table, params.horizon)?.values();
        add_noise(&mut values, params.noise_sigma(), rng)?;
        self.fit(TimeSeries::from_values(values))
    }

    /// Smooth an already observed series.
    pub fn fit(&self, observed: TimeSeries) -> Result<ForecastResult> {
        let predicted = self
            .smoother
            .smooth(&observed.times(), &observed.values())?;
        debug!(
            law = self.synthesizer.law_name(),
            smoother = self.smoother.name(),
            points = observed.len(),
            "fitted forecast"
        );
        ForecastResult::new(observed, TimeSeries::from_values(predicted))
    }
}
