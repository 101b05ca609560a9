//! Externally supplied time/value table

use serde::Serialize;

use crate::error::{Result, TwinError};

/// Two-column table uploaded in place of a synthesized curve.
///
/// Times are strictly increasing and every cell is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalTable {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl ExternalTable {
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(TwinError::InvalidData(format!(
                "{} time entries but {} values",
                times.len(),
                values.len()
            )));
        }
        if times.is_empty() {
            return Err(TwinError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if let Some(i) = times
            .iter()
            .zip(values.iter())
            .position(|(t, v)| !t.is_finite() || !v.is_finite())
        {
            return Err(TwinError::InvalidData(format!(
                "row {}: time and value must be finite",
                i + 1
            )));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TwinError::InvalidData(format!(
                "row {}: time {} does not increase past {}",
                i + 2,
                times[i + 1],
                times[i]
            )));
        }
        Ok(Self { times, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table() {
        let table = ExternalTable::new(vec![2000.0, 2001.0, 2002.0], vec![90.0, 80.0, 75.0]).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.values()[2], 75.0);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(
            ExternalTable::new(vec![], vec![]),
            Err(TwinError::InsufficientData {
                required: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_non_increasing_times_rejected() {
        let err = ExternalTable::new(vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        match err {
            TwinError::InvalidData(msg) => assert!(msg.starts_with("row 3")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(ExternalTable::new(vec![0.0, 1.0], vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(ExternalTable::new(vec![0.0, 1.0], vec![1.0]).is_err());
    }
}
