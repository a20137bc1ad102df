//! Error types for the HTTP layer

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use forecast_facade::ForecastError;
use predictor_facade::PredictorError;
use thiserror::Error;
use tracing::{error, warn};

use crate::chart::ChartError;
use crate::config::ConfigError;

/// Message returned when `/predict_csv` receives no file
pub const NO_FILE_MESSAGE: &str = "No file uploaded";

/// Message returned when an upload exceeds the configured body limit
pub const UPLOAD_TOO_LARGE_MESSAGE: &str = "Uploaded file is too large";

/// Request-time failures
///
/// Only a missing file and an oversized upload are shown to the user;
/// everything else is logged and answered with a generic 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Prediction failed: {0}")]
    Predictor(#[from] PredictorError),

    #[error("Forecast failed: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Chart rendering failed: {0}")]
    Chart(#[from] ChartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NoFile => (StatusCode::BAD_REQUEST, NO_FILE_MESSAGE).into_response(),
            AppError::Multipart(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                warn!(error = %err, "upload rejected");
                (StatusCode::PAYLOAD_TOO_LARGE, UPLOAD_TOO_LARGE_MESSAGE).into_response()
            }
            other => {
                error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// Failures while bringing the server up
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load regressor: {0}")]
    Predictor(#[from] PredictorError),

    #[error("Failed to load forecaster: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_is_bad_request() {
        let response = AppError::NoFile.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = AppError::Predictor(PredictorError::InvalidValue {
            column: "Orders".to_string(),
            value: "x".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_messages() {
        assert_eq!(AppError::NoFile.to_string(), "No file uploaded");
        let err = StartupError::from(ForecastError::InvalidModel("empty".to_string()));
        assert_eq!(err.to_string(), "Failed to load forecaster: Invalid model: empty");
    }
}
