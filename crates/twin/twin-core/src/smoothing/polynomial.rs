//! Polynomial least-squares smoother
//!
//! Fits `y = c0 + c1·x + ... + cd·x^d` by ordinary least squares, where `x`
//! is the time axis mapped onto `[-1, 1]`. Rescaling keeps the normal
//! equations well conditioned for horizons of a few dozen steps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use twin_spi::{check_smoothing_input, Result, Smoother, TwinError};

use super::linalg::solve_linear_system;

/// Degree used when none is configured.
pub const DEFAULT_DEGREE: usize = 3;

/// Highest degree accepted.
pub const MAX_DEGREE: usize = 10;

/// Ordinary least squares on a polynomial basis.
///
/// # Example
///
/// ```rust
/// use twin_core::{PolynomialSmoother, Smoother};
///
/// let t: Vec<f64> = (0..6).map(|i| i as f64).collect();
/// let y: Vec<f64> = t.iter().map(|x| 1.0 + 2.0 * x).collect();
/// let fitted = PolynomialSmoother::new(1).smooth(&t, &y).unwrap();
/// assert!((fitted[5] - 11.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolynomialSmoother {
    degree: usize,
}

impl Default for PolynomialSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_DEGREE)
    }
}

impl PolynomialSmoother {
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn validate(&self) -> Result<()> {
        if self.degree > MAX_DEGREE {
            return Err(TwinError::invalid_parameter(
                "degree",
                format!("must be at most {}, got {}", MAX_DEGREE, self.degree),
            ));
        }
        Ok(())
    }
}

fn distinct_count(t: &[f64]) -> usize {
    let mut sorted = t.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted.len()
}

impl Smoother for PolynomialSmoother {
    fn smooth(&self, t: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        check_smoothing_input(t, y)?;
        self.validate()?;

        let n = y.len();
        let distinct = distinct_count(t);
        if distinct == 1 {
            let mean = y.iter().sum::<f64>() / n as f64;
            return Ok(vec![mean; n]);
        }

        let degree = self.degree.min(distinct - 1);
        let terms = degree + 1;

        let t_min = t.iter().copied().fold(f64::INFINITY, f64::min);
        let t_max = t.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = t_max - t_min;
        let x: Vec<f64> = t.iter().map(|&ti| 2.0 * (ti - t_min) / span - 1.0).collect();

        // Powers of x per sample
        let basis: Vec<Vec<f64>> = x
            .iter()
            .map(|&xi| {
                let mut row = Vec::with_capacity(terms);
                let mut p = 1.0;
                for _ in 0..terms {
                    row.push(p);
                    p *= xi;
                }
                row
            })
            .collect();

        // Normal equations: (XᵀX) c = Xᵀy
        let mut xtx = vec![0.0; terms * terms];
        let mut xty = vec![0.0; terms];
        for (row, &yi) in basis.iter().zip(y.iter()) {
            for i in 0..terms {
                xty[i] += row[i] * yi;
                for j in 0..terms {
                    xtx[i * terms + j] += row[i] * row[j];
                }
            }
        }

        let coefficients = solve_linear_system(xtx, xty, terms)?;
        debug!(degree, ?coefficients, "fitted polynomial");

        Ok(basis
            .iter()
            .map(|row| row.iter().zip(coefficients.iter()).map(|(b, c)| b * c).sum())
            .collect())
    }

    fn name(&self) -> &str {
        "polynomial"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_recovers_cubic_exactly() {
        let t = axis(12);
        let y: Vec<f64> = t
            .iter()
            .map(|x| 5.0 - 0.5 * x + 0.2 * x * x - 0.01 * x * x * x)
            .collect();
        let fitted = PolynomialSmoother::default().smooth(&t, &y).unwrap();
        for (f, o) in fitted.iter().zip(y.iter()) {
            assert!((f - o).abs() < 1e-8, "{} vs {}", f, o);
        }
    }

    #[test]
    fn test_output_length_matches_input() {
        for n in [2, 3, 10, 30] {
            let t = axis(n);
            let y: Vec<f64> = t.iter().map(|x| 100.0 * (-0.2 * x).exp()).collect();
            assert_eq!(PolynomialSmoother::default().smooth(&t, &y).unwrap().len(), n);
        }
    }

    #[test]
    fn test_degree_capped_by_point_count() {
        // Two points with degree 3 still fit the line through them
        let fitted = PolynomialSmoother::new(3)
            .smooth(&[0.0, 1.0], &[10.0, 4.0])
            .unwrap();
        assert!((fitted[0] - 10.0).abs() < 1e-10);
        assert!((fitted[1] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_degree_zero_is_mean() {
        let fitted = PolynomialSmoother::new(0)
            .smooth(&axis(4), &[1.0, 2.0, 3.0, 6.0])
            .unwrap();
        assert!(fitted.iter().all(|v| (v - 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_smooths_decay_closely() {
        let t = axis(16);
        let y: Vec<f64> = t.iter().map(|x| 100.0 * (-0.2 * x).exp()).collect();
        let fitted = PolynomialSmoother::default().smooth(&t, &y).unwrap();
        let max_err = fitted
            .iter()
            .zip(y.iter())
            .map(|(f, o)| (f - o).abs())
            .fold(0.0, f64::max);
        assert!(max_err < 3.0, "max error {}", max_err);
    }

    #[test]
    fn test_rejects_excessive_degree() {
        let result = PolynomialSmoother::new(MAX_DEGREE + 1).smooth(&axis(20), &[1.0; 20]);
        assert!(matches!(result, Err(TwinError::InvalidParameter { .. })));
    }

    #[test]
    fn test_rejects_bad_input() {
        let smoother = PolynomialSmoother::default();
        assert!(smoother.smooth(&[0.0], &[1.0]).is_err());
        assert!(smoother.smooth(&[0.0, 1.0], &[1.0]).is_err());
        assert!(smoother.smooth(&[0.0, 1.0], &[1.0, f64::NAN]).is_err());
    }
}
