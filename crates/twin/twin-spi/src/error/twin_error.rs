//! Forecast error types
//!
//! Defines the standardized error type for synthesis, smoothing, ingestion,
//! and export.

use thiserror::Error;

/// Errors that can occur while generating or exporting a forecast
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TwinError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Malformed input data (uploads, mismatched lengths, summary rows)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl TwinError {
    /// Shorthand for [`TwinError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for TwinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Display Tests
    // ==========================================================================

    #[test]
    fn test_insufficient_data_display() {
        let error = TwinError::InsufficientData {
            required: 2,
            actual: 1,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 2 points, got 1"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = TwinError::invalid_parameter("horizon", "must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'horizon': must be positive"
        );
    }

    #[test]
    fn test_invalid_data_display() {
        let error = TwinError::InvalidData("row 3: value 'abc' is not numeric".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid data: row 3: value 'abc' is not numeric"
        );
    }

    #[test]
    fn test_numerical_error_display() {
        let error = TwinError::NumericalError("singular normal equations".to_string());
        assert_eq!(error.to_string(), "Numerical error: singular normal equations");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let error: TwinError = io.into();
        match error {
            TwinError::Io(msg) => assert!(msg.contains("missing.csv")),
            _ => panic!("Expected Io variant"),
        }
    }

    // ==========================================================================
    // Trait Implementation Tests
    // ==========================================================================

    #[test]
    fn test_error_is_clone_and_partial_eq() {
        let error = TwinError::InsufficientData {
            required: 2,
            actual: 0,
        };
        assert_eq!(error.clone(), error);
        assert_ne!(error, TwinError::NumericalError("x".to_string()));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: &dyn std::error::Error = &TwinError::InvalidData(String::new());
        let _ = error.to_string();
    }

    #[test]
    fn test_result_error_propagation() {
        fn inner() -> crate::Result<f64> {
            Err(TwinError::invalid_parameter("base_value", "must be positive"))
        }

        fn outer() -> crate::Result<f64> {
            let v = inner()?;
            Ok(v * 2.0)
        }

        assert!(matches!(
            outer(),
            Err(TwinError::InvalidParameter { .. })
        ));
    }
}
