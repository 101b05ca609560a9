//! Regression smoother trait

use crate::error::{Result, TwinError};

/// Regression strategy mapping an observed curve to a same-length prediction.
///
/// Every strategy is a pure function of its inputs: repeated calls with the
/// same `(t, y)` return the same prediction.
pub trait Smoother: Send + Sync {
    /// Fit to `(t[i], y[i])` pairs and return the fitted value at each `t[i]`.
    fn smooth(&self, t: &[f64], y: &[f64]) -> Result<Vec<f64>>;

    /// Short identifier used in logs and exports
    fn name(&self) -> &str;
}

/// Minimum number of points any smoother accepts.
pub const MIN_SMOOTHING_POINTS: usize = 2;

/// Shared input checks for [`Smoother`] implementations.
pub fn check_smoothing_input(t: &[f64], y: &[f64]) -> Result<()> {
    if t.len() != y.len() {
        return Err(TwinError::InvalidData(format!(
            "{} time indices but {} observed values",
            t.len(),
            y.len()
        )));
    }
    if y.len() < MIN_SMOOTHING_POINTS {
        return Err(TwinError::InsufficientData {
            required: MIN_SMOOTHING_POINTS,
            actual: y.len(),
        });
    }
    if t.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(TwinError::InvalidData(
            "smoother input contains non-finite values".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock implementation: predicts the mean everywhere
    struct MeanSmoother;

    impl Smoother for MeanSmoother {
        fn smooth(&self, t: &[f64], y: &[f64]) -> Result<Vec<f64>> {
            check_smoothing_input(t, y)?;
            let mean = y.iter().sum::<f64>() / y.len() as f64;
            Ok(vec![mean; y.len()])
        }

        fn name(&self) -> &str {
            "mean"
        }
    }

    #[test]
    fn test_mock_smoother_length() {
        let out = MeanSmoother.smooth(&[0.0, 1.0, 2.0], &[3.0, 6.0, 9.0]).unwrap();
        assert_eq!(out, vec![6.0, 6.0, 6.0]);
    }

    #[test]
    fn test_single_point_rejected() {
        assert_eq!(
            MeanSmoother.smooth(&[0.0], &[1.0]),
            Err(TwinError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        assert!(matches!(
            check_smoothing_input(&[0.0, 1.0], &[1.0]),
            Err(TwinError::InvalidData(_))
        ));
    }

    #[test]
    fn test_nan_rejected() {
        assert!(check_smoothing_input(&[0.0, 1.0], &[1.0, f64::NAN]).is_err());
    }
}
