//! Confidence interval implementations
//!
//! Provides methods for computing prediction intervals for forecasts.

use forecast_spi::{ConfidenceInterval, ConfidenceIntervalComputer};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Forecast with confidence intervals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastWithConfidence {
    /// Point forecast
    pub forecast: Vec<f64>,
    /// Lower bound of confidence interval
    pub lower: Vec<f64>,
    /// Upper bound of confidence interval
    pub upper: Vec<f64>,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
}

impl From<ForecastWithConfidence> for ConfidenceInterval {
    fn from(f: ForecastWithConfidence) -> Self {
        Self {
            forecast: f.forecast,
            lower: f.lower,
            upper: f.upper,
            confidence_level: f.confidence_level,
        }
    }
}

impl ForecastWithConfidence {
    /// Create from point forecast and standard errors
    ///
    /// Bounds are symmetric, so `lower <= forecast <= upper` holds for any
    /// non-negative standard error.
    pub fn from_standard_errors(
        forecast: Vec<f64>,
        std_errors: &[f64],
        confidence_level: f64,
    ) -> Self {
        let z = z_score(confidence_level);

        let lower = forecast
            .iter()
            .zip(std_errors.iter())
            .map(|(&f, &se)| f - z * se.abs())
            .collect();

        let upper = forecast
            .iter()
            .zip(std_errors.iter())
            .map(|(&f, &se)| f + z * se.abs())
            .collect();

        Self {
            forecast,
            lower,
            upper,
            confidence_level,
        }
    }
}

/// Standard error-based confidence interval computer
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardErrorComputer;

impl StandardErrorComputer {
    pub fn new() -> Self {
        Self
    }
}

impl ConfidenceIntervalComputer for StandardErrorComputer {
    fn compute(
        &self,
        forecast: &[f64],
        std_errors: &[f64],
        confidence_level: f64,
    ) -> ConfidenceInterval {
        ForecastWithConfidence::from_standard_errors(forecast.to_vec(), std_errors, confidence_level)
            .into()
    }
}

/// Two-sided standard normal quantile for a confidence level
///
/// Levels are clamped to `[0, 1]`; a level of 1 gives an infinite band.
pub fn z_score(confidence_level: f64) -> f64 {
    let p = 0.5 + confidence_level.clamp(0.0, 1.0) / 2.0;
    // unit variance is always a valid normal
    Normal::new(0.0, 1.0).map_or(f64::NAN, |normal| normal.inverse_cdf(p))
}
