//! Forecast error types

use thiserror::Error;

/// Result type alias for forecasting operations
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur during forecasting operations
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Insufficient history for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model artifact is structurally invalid
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Model artifact could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_insufficient_data_error_message() {
        let error = ForecastError::InsufficientData {
            required: 2,
            actual: 1,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 2 points, got 1"
        );
    }

    #[test]
    fn test_invalid_parameter_error_message() {
        let error = ForecastError::InvalidParameter {
            name: "interval_width".to_string(),
            reason: "must be in [0.5, 1)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'interval_width': must be in [0.5, 1)"
        );
    }

    #[test]
    fn test_invalid_model_error_message() {
        let error = ForecastError::InvalidModel("history is not sorted".to_string());
        assert_eq!(error.to_string(), "Invalid model: history is not sorted");
    }

    #[test]
    fn test_io_error_has_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = ForecastError::from(io);
        assert!(error.source().is_some());
    }

    #[test]
    fn test_all_variants_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForecastError>();
    }

    #[test]
    fn test_error_can_be_boxed() {
        let error = ForecastError::InvalidModel("empty".to_string());
        let boxed: Box<dyn Error + Send + Sync> = Box::new(error);
        assert_eq!(boxed.to_string(), "Invalid model: empty");
    }
}
