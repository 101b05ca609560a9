//! Pass-through smoother

use twin_spi::{check_smoothing_input, Result, Smoother};

/// Returns the observed values unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentitySmoother;

impl Smoother for IdentitySmoother {
    fn smooth(&self, t: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        check_smoothing_input(t, y)?;
        Ok(y.to_vec())
    }

    fn name(&self) -> &str {
        "none"
    }
}
