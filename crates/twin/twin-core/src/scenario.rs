//! Three-domain scenarios
//!
//! Each scenario turns a handful of settings into one forecast per
//! [`Domain`], in [`Domain::all`] order:
//!
//! - [`InterventionSettings`]: shared intervention rate with noise and an
//!   optional uploaded air-quality curve
//! - [`FieldSettings`]: per-domain physical parameters, noise free
//! - [`ScriptScenario`]: fixed batch-report curves

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use twin_spi::{
    Domain, ExternalTable, ForecastParameters, ForecastResult, Result, SummaryRow, TwinError,
    MAX_HORIZON, MIN_SMOOTHING_POINTS,
};

use crate::generator::ForecastGenerator;
use crate::law::{CurveLaw, SeasonalDecay, DEFAULT_SEASONAL_PERIOD};
use crate::smoothing::SmootherSettings;

/// Starting level of every intervention curve.
pub const INTERVENTION_BASE: f64 = 100.0;

/// Decay rate at full strength and unit impact.
pub const BASE_DECAY_RATE: f64 = 0.2;

/// Plastics decay relative to the intervention rate.
pub const PLASTICS_RATE_FACTOR: f64 = 0.8;

/// Plastics noise relative to the configured noise level.
pub const PLASTICS_NOISE_FACTOR: f64 = 0.8;

/// Malaria noise relative to the configured noise level.
pub const MALARIA_NOISE_FACTOR: f64 = 0.5;

pub const YEARS_RANGE: RangeInclusive<usize> = 5..=30;
pub const STRENGTH_RANGE: RangeInclusive<f64> = 10.0..=100.0;
pub const IMPACT_RANGE: RangeInclusive<f64> = 0.1..=2.0;
pub const NOISE_RANGE: RangeInclusive<f64> = 0.0..=0.3;
pub const INTERVENTION_RESISTANCE_RANGE: RangeInclusive<f64> = 0.0..=0.5;

pub const PM_START_RANGE: RangeInclusive<f64> = 40.0..=150.0;
pub const PM_EFFICIENCY_RANGE: RangeInclusive<f64> = 0.1..=0.9;
pub const SEASONALITY_RANGE: RangeInclusive<f64> = 0.0..=0.5;
pub const PLASTIC_LOAD_RANGE: RangeInclusive<f64> = 50.0..=150.0;
pub const PETASE_RATE_RANGE: RangeInclusive<f64> = 0.1..=0.6;
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.8..=1.5;
pub const MALARIA_CASES_RANGE: RangeInclusive<f64> = 50.0..=200.0;
pub const GENE_DRIVE_RANGE: RangeInclusive<f64> = 0.1..=0.5;
pub const FIELD_RESISTANCE_RANGE: RangeInclusive<f64> = 0.0..=0.4;

/// Field-scenario horizons: 13 months, 11 years, 16 years.
pub const FIELD_AIR_HORIZON: usize = 13;
pub const FIELD_PLASTICS_HORIZON: usize = 11;
pub const FIELD_MALARIA_HORIZON: usize = 16;

/// Decay rate for an intervention of `strength_pct` percent scaled by
/// `impact_scale`: `0.2 · strength / 100 · impact`.
pub fn intervention_coefficient(strength_pct: f64, impact_scale: f64) -> f64 {
    BASE_DECAY_RATE * (strength_pct / 100.0) * impact_scale
}

fn check_range(name: &str, value: f64, range: &RangeInclusive<f64>) -> Result<()> {
    if !value.is_finite() || !range.contains(&value) {
        return Err(TwinError::invalid_parameter(
            name,
            format!(
                "must be in [{}, {}], got {}",
                range.start(),
                range.end(),
                value
            ),
        ));
    }
    Ok(())
}

fn check_count(name: &str, value: usize, range: &RangeInclusive<usize>) -> Result<()> {
    if !range.contains(&value) {
        return Err(TwinError::invalid_parameter(
            name,
            format!(
                "must be in [{}, {}], got {}",
                range.start(),
                range.end(),
                value
            ),
        ));
    }
    Ok(())
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(TwinError::invalid_parameter(name, "must be finite"));
    }
    Ok(())
}

/// Forecast for one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainForecast {
    pub domain: Domain,
    /// Unit of one time step in this scenario
    pub time_unit: &'static str,
    /// Time covered by the forecast, in `time_unit`
    pub span: usize,
    pub result: ForecastResult,
}

impl DomainForecast {
    pub fn summary_row(&self) -> SummaryRow {
        SummaryRow::for_forecast(self.domain, &self.result, self.span, self.time_unit)
    }
}

/// Intervention dashboard settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterventionSettings {
    /// Forecast duration in years
    pub years: usize,
    /// Intervention strength in percent
    pub strength_pct: f64,
    /// Intervention impact multiplier
    pub impact_scale: f64,
    /// Environmental variability as a fraction of the base level
    pub noise_level: f64,
    /// Mosquito resistance
    pub resistance: f64,
}

impl Default for InterventionSettings {
    fn default() -> Self {
        Self {
            years: 15,
            strength_pct: 60.0,
            impact_scale: 1.0,
            noise_level: 0.1,
            resistance: 0.1,
        }
    }
}

impl InterventionSettings {
    pub fn validate(&self) -> Result<()> {
        check_count("years", self.years, &YEARS_RANGE)?;
        check_range("strength_pct", self.strength_pct, &STRENGTH_RANGE)?;
        check_range("impact_scale", self.impact_scale, &IMPACT_RANGE)?;
        check_range("noise_level", self.noise_level, &NOISE_RANGE)?;
        check_range("resistance", self.resistance, &INTERVENTION_RESISTANCE_RANGE)?;
        Ok(())
    }

    pub fn decay_rate(&self) -> f64 {
        intervention_coefficient(self.strength_pct, self.impact_scale)
    }

    /// Parameters for each domain, in domain order.
    pub fn parameters(&self) -> [ForecastParameters; 3] {
        let rate = self.decay_rate();
        [
            ForecastParameters::new(self.years, INTERVENTION_BASE, rate, self.noise_level),
            ForecastParameters::new(
                self.years,
                INTERVENTION_BASE,
                rate * PLASTICS_RATE_FACTOR,
                self.noise_level * PLASTICS_NOISE_FACTOR,
            ),
            ForecastParameters::new(
                self.years,
                INTERVENTION_BASE,
                rate,
                self.noise_level * MALARIA_NOISE_FACTOR,
            )
            .with_resistance(self.resistance),
        ]
    }

    /// Run all three domains.
    ///
    /// Noise for every domain is drawn from `rng` in domain order. When
    /// `upload` is given it replaces the synthesized air-quality curve.
    pub fn run<R: Rng + ?Sized>(
        &self,
        smoother: &SmootherSettings,
        upload: Option<&ExternalTable>,
        rng: &mut R,
    ) -> Result<Vec<DomainForecast>> {
        self.validate()?;
        smoother.validate()?;

        let [air, plastics, malaria] = self.parameters();

        let air_generator = ForecastGenerator::from_settings(CurveLaw::Exponential, smoother)?;
        let air_result = match upload {
            Some(table) => air_generator.generate_from_table(&air, table, rng)?,
            None => air_generator.generate(&air, rng)?,
        };

        let plastics_result = ForecastGenerator::from_settings(CurveLaw::Exponential, smoother)?
            .generate(&plastics, rng)?;
        let malaria_result = ForecastGenerator::from_settings(CurveLaw::Suppressed, smoother)?
            .generate(&malaria, rng)?;

        info!(
            years = self.years,
            rate = self.decay_rate(),
            smoother = %smoother.kind,
            uploaded = upload.is_some(),
            "intervention scenario complete"
        );

        Ok(vec![
            DomainForecast {
                domain: Domain::AirQuality,
                time_unit: "years",
                span: self.years,
                result: air_result,
            },
            DomainForecast {
                domain: Domain::Microplastics,
                time_unit: "years",
                span: self.years,
                result: plastics_result,
            },
            DomainForecast {
                domain: Domain::Malaria,
                time_unit: "years",
                span: self.years,
                result: malaria_result,
            },
        ])
    }
}

/// Field dashboard settings: one physical parameter set per domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Initial PM2.5 in µg/m³
    pub pm_start: f64,
    /// Fraction of PM2.5 removed per year by the filters
    pub pm_efficiency: f64,
    /// Relative seasonal swing
    pub seasonality: f64,
    /// Initial plastic load in percent
    pub plastic_load: f64,
    /// PETase decay rate per year
    pub petase_rate: f64,
    /// Ocean temperature factor on the PETase rate
    pub temperature: f64,
    /// Baseline malaria cases
    pub malaria_cases: f64,
    /// Gene drive efficacy per year
    pub gene_drive: f64,
    /// Mosquito resistance
    pub resistance: f64,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            pm_start: 90.0,
            pm_efficiency: 0.5,
            seasonality: 0.1,
            plastic_load: 100.0,
            petase_rate: 0.3,
            temperature: 1.0,
            malaria_cases: 100.0,
            gene_drive: 0.2,
            resistance: 0.1,
        }
    }
}

impl FieldSettings {
    pub fn validate(&self) -> Result<()> {
        check_range("pm_start", self.pm_start, &PM_START_RANGE)?;
        check_range("pm_efficiency", self.pm_efficiency, &PM_EFFICIENCY_RANGE)?;
        check_range("seasonality", self.seasonality, &SEASONALITY_RANGE)?;
        check_range("plastic_load", self.plastic_load, &PLASTIC_LOAD_RANGE)?;
        check_range("petase_rate", self.petase_rate, &PETASE_RATE_RANGE)?;
        check_range("temperature", self.temperature, &TEMPERATURE_RANGE)?;
        check_range("malaria_cases", self.malaria_cases, &MALARIA_CASES_RANGE)?;
        check_range("gene_drive", self.gene_drive, &GENE_DRIVE_RANGE)?;
        check_range("resistance", self.resistance, &FIELD_RESISTANCE_RANGE)?;
        Ok(())
    }

    /// Run all three domains without noise.
    pub fn run(&self, smoother: &SmootherSettings) -> Result<Vec<DomainForecast>> {
        self.validate()?;
        smoother.validate()?;

        let pm_rate = SeasonalDecay::rate_from_efficiency(self.pm_efficiency)?;
        let air = ForecastGenerator::from_settings(
            CurveLaw::Seasonal {
                amplitude: self.seasonality,
                period: DEFAULT_SEASONAL_PERIOD,
            },
            smoother,
        )?
        .generate_clean(&ForecastParameters::new(
            FIELD_AIR_HORIZON,
            self.pm_start,
            pm_rate,
            0.0,
        ))?;

        let plastics = ForecastGenerator::from_settings(CurveLaw::Exponential, smoother)?
            .generate_clean(
                &ForecastParameters::new(
                    FIELD_PLASTICS_HORIZON,
                    self.plastic_load,
                    self.petase_rate,
                    0.0,
                )
                .with_scale(self.temperature),
            )?;

        let malaria = ForecastGenerator::from_settings(CurveLaw::Suppressed, smoother)?
            .generate_clean(
                &ForecastParameters::new(
                    FIELD_MALARIA_HORIZON,
                    self.malaria_cases,
                    self.gene_drive,
                    0.0,
                )
                .with_resistance(self.resistance),
            )?;

        info!(smoother = %smoother.kind, "field scenario complete");

        Ok(with_domain_units(
            [air, plastics, malaria],
            [
                FIELD_AIR_HORIZON - 1,
                FIELD_PLASTICS_HORIZON - 1,
                FIELD_MALARIA_HORIZON - 1,
            ],
        ))
    }
}

/// Batch-report curves: a linear PM2.5 decline and two exponential decays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptScenario {
    pub pm_start: f64,
    pub pm_target: f64,
    pub pm_months: usize,
    pub plastic_rate: f64,
    /// Last year of the plastics curve; the curve has `plastic_years + 1` points
    pub plastic_years: usize,
    pub malaria_rate: f64,
    /// Last year of the malaria curve; the curve has `malaria_years + 1` points
    pub malaria_years: usize,
}

impl Default for ScriptScenario {
    fn default() -> Self {
        Self {
            pm_start: 80.0,
            pm_target: 40.0,
            pm_months: 12,
            plastic_rate: 0.35,
            plastic_years: 10,
            malaria_rate: 0.2,
            malaria_years: 15,
        }
    }
}

impl ScriptScenario {
    pub fn validate(&self) -> Result<()> {
        if !self.pm_start.is_finite() || self.pm_start <= 0.0 {
            return Err(TwinError::invalid_parameter(
                "pm_start",
                format!("must be positive, got {}", self.pm_start),
            ));
        }
        check_finite("pm_target", self.pm_target)?;
        check_count("pm_months", self.pm_months, &(MIN_SMOOTHING_POINTS..=MAX_HORIZON))?;
        // year counts exclude the starting point
        let years = MIN_SMOOTHING_POINTS - 1..=MAX_HORIZON - 1;
        check_count("plastic_years", self.plastic_years, &years)?;
        check_count("malaria_years", self.malaria_years, &years)?;
        for (name, rate) in [
            ("plastic_rate", self.plastic_rate),
            ("malaria_rate", self.malaria_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(TwinError::invalid_parameter(
                    name,
                    format!("must be non-negative, got {}", rate),
                ));
            }
        }
        Ok(())
    }

    pub fn run(&self, smoother: &SmootherSettings) -> Result<Vec<DomainForecast>> {
        self.validate()?;
        smoother.validate()?;

        let air = ForecastGenerator::from_settings(
            CurveLaw::Linear {
                target: self.pm_target,
            },
            smoother,
        )?
        .generate_clean(&ForecastParameters::new(
            self.pm_months,
            self.pm_start,
            0.0,
            0.0,
        ))?;

        let plastics = ForecastGenerator::from_settings(CurveLaw::Exponential, smoother)?
            .generate_clean(&ForecastParameters::new(
                self.plastic_years + 1,
                INTERVENTION_BASE,
                self.plastic_rate,
                0.0,
            ))?;

        let malaria = ForecastGenerator::from_settings(CurveLaw::Exponential, smoother)?
            .generate_clean(&ForecastParameters::new(
                self.malaria_years + 1,
                INTERVENTION_BASE,
                self.malaria_rate,
                0.0,
            ))?;

        info!(smoother = %smoother.kind, "script scenario complete");

        // The PM2.5 curve is reported over its month count
        Ok(with_domain_units(
            [air, plastics, malaria],
            [self.pm_months, self.plastic_years, self.malaria_years],
        ))
    }
}

fn with_domain_units(results: [ForecastResult; 3], spans: [usize; 3]) -> Vec<DomainForecast> {
    results
        .into_iter()
        .zip(spans)
        .zip(Domain::all())
        .map(|((result, span), &domain)| DomainForecast {
            domain,
            time_unit: domain.time_unit(),
            span,
            result,
        })
        .collect()
}
