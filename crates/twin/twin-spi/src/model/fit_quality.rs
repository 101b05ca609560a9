//! Fit quality metrics
//!
//! Compare a predicted curve against the observed one it was fitted to.

use serde::{Deserialize, Serialize};

/// Summary of how closely a prediction follows the observed values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Root mean squared error, same scale as the data
    pub rmse: f64,
    /// Coefficient of determination
    pub r_squared: f64,
}

impl FitQuality {
    pub fn between(observed: &[f64], predicted: &[f64]) -> Self {
        Self {
            rmse: rmse(observed, predicted),
            r_squared: r_squared(observed, predicted),
        }
    }
}

/// Mean Squared Error (MSE)
///
/// Returns NaN for empty or mismatched inputs.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    sum / actual.len() as f64
}

/// Root Mean Squared Error (RMSE)
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// R-squared (coefficient of determination)
///
/// 1.0 is a perfect fit. A constant observed series counts as perfectly
/// explained.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot < 1e-10 {
        return 1.0;
    }

    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse() {
        let actual = vec![1.0, 2.0, 3.0, 4.0];
        let predicted = vec![2.0, 3.0, 4.0, 5.0];
        assert!((mse(&actual, &predicted) - 1.0).abs() < 1e-10);
        assert!((rmse(&actual, &predicted) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_mismatched_lengths_are_nan() {
        assert!(mse(&[1.0], &[1.0, 2.0]).is_nan());
        assert!(r_squared(&[], &[]).is_nan());
    }

    #[test]
    fn test_r_squared_mean_prediction_is_zero() {
        let actual = vec![1.0, 2.0, 3.0];
        let predicted = vec![2.0, 2.0, 2.0];
        assert!(r_squared(&actual, &predicted).abs() < 1e-10);
    }

    #[test]
    fn test_constant_series() {
        let quality = FitQuality::between(&[5.0, 5.0, 5.0], &[5.0, 5.0, 5.0]);
        assert_eq!(quality.r_squared, 1.0);
        assert_eq!(quality.rmse, 0.0);
    }
}
