//! Dense linear solves for the regression smoothers

use twin_spi::{Result, TwinError};

const PIVOT_EPSILON: f64 = 1e-12;

/// Solve `A x = b` for a square row-major `A` of size `n × n`.
///
/// Gaussian elimination with partial pivoting followed by back substitution.
/// A pivot smaller than `1e-12` in magnitude is reported as a singular system.
pub(crate) fn solve_linear_system(mut a: Vec<f64>, mut b: Vec<f64>, n: usize) -> Result<Vec<f64>> {
    if a.len() != n * n || b.len() != n {
        return Err(TwinError::NumericalError(format!(
            "system of size {} given {} coefficients and {} targets",
            n,
            a.len(),
            b.len()
        )));
    }

    for col in 0..n {
        let mut max_row = col;
        for row in (col + 1)..n {
            if a[row * n + col].abs() > a[max_row * n + col].abs() {
                max_row = row;
            }
        }

        if a[max_row * n + col].abs() < PIVOT_EPSILON {
            return Err(TwinError::NumericalError(format!(
                "singular system at column {}",
                col
            )));
        }

        if max_row != col {
            for j in 0..n {
                a.swap(col * n + j, max_row * n + j);
            }
            b.swap(col, max_row);
        }

        let pivot = a[col * n + col];
        for row in (col + 1)..n {
            let factor = a[row * n + col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                a[row * n + j] -= factor * a[col * n + j];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let tail: f64 = ((i + 1)..n).map(|j| a[i * n + j] * x[j]).sum();
        x[i] = (b[i] - tail) / a[i * n + i];
    }

    Ok(x)
}
