//! Time series and forecast result models

use serde::{Deserialize, Serialize};

use crate::error::{Result, TwinError};
use crate::model::fit_quality::FitQuality;

/// One sample of a [`TimeSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Time step, starting at 0
    pub t: usize,
    /// Value at this step
    pub value: f64,
}

/// Ordered series with time steps `0, 1, ..., len - 1`.
///
/// The only constructor is [`TimeSeries::from_values`], so the time axis is
/// always strictly increasing from zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeSeries {
    points: Vec<Point>,
}

impl TimeSeries {
    /// Build a series whose time axis is the value index.
    pub fn from_values(values: Vec<f64>) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(t, value)| Point { t, value })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Time steps as floats, the input expected by smoothers.
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.t as f64).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn first(&self) -> Option<f64> {
        self.points.first().map(|p| p.value)
    }

    pub fn last(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    pub fn min(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            points: Vec<Point>,
        }

        let raw = Raw::deserialize(deserializer)?;
        for (i, p) in raw.points.iter().enumerate() {
            if p.t != i {
                return Err(serde::de::Error::custom(format!(
                    "time step {} found at position {}",
                    p.t, i
                )));
            }
        }
        Ok(Self { points: raw.points })
    }
}

/// Observed and predicted curves on a shared time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub observed: TimeSeries,
    pub predicted: TimeSeries,
}

impl ForecastResult {
    /// Pair two series, rejecting mismatched lengths.
    pub fn new(observed: TimeSeries, predicted: TimeSeries) -> Result<Self> {
        if observed.len() != predicted.len() {
            return Err(TwinError::InvalidData(format!(
                "observed has {} points but predicted has {}",
                observed.len(),
                predicted.len()
            )));
        }
        Ok(Self {
            observed,
            predicted,
        })
    }

    pub fn horizon(&self) -> usize {
        self.observed.len()
    }

    /// How well the prediction tracks the observed curve.
    pub fn fit_quality(&self) -> FitQuality {
        FitQuality::between(&self.observed.values(), &self.predicted.values())
    }
}
