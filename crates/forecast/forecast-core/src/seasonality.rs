//! Fourier seasonality
//!
//! Each seasonal component is a truncated Fourier series over days since
//! 1970-01-01, with coefficients ordered `sin(1), cos(1), sin(2), cos(2), ...`.

use chrono::NaiveDate;
use forecast_spi::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// How a seasonal component combines with the trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalityMode {
    /// Added to the trend, in units of the target
    #[default]
    Additive,
    /// Scales the trend by `1 + component`
    Multiplicative,
}

/// One fitted seasonal component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub name: String,
    /// Cycle length in days
    pub period: f64,
    pub fourier_order: usize,
    #[serde(default)]
    pub mode: SeasonalityMode,
    /// `2 * fourier_order` coefficients
    pub beta: Vec<f64>,
}

impl Seasonality {
    pub fn validate(&self) -> Result<()> {
        if !(self.period.is_finite() && self.period > 0.0) {
            return Err(ForecastError::InvalidParameter {
                name: format!("{}.period", self.name),
                reason: "must be positive".to_string(),
            });
        }
        if self.beta.len() != 2 * self.fourier_order {
            return Err(ForecastError::InvalidModel(format!(
                "seasonality '{}' has {} coefficients, expected {}",
                self.name,
                self.beta.len(),
                2 * self.fourier_order
            )));
        }
        Ok(())
    }

    /// Component value on `date`, in scaled units
    pub fn evaluate(&self, date: NaiveDate) -> f64 {
        fourier_series(days_since_epoch(date), self.period, self.fourier_order)
            .iter()
            .zip(&self.beta)
            .map(|(x, b)| x * b)
            .sum()
    }
}

/// Days between 1970-01-01 and `date`
pub fn days_since_epoch(date: NaiveDate) -> f64 {
    (date - NaiveDate::default()).num_days() as f64
}

/// Fourier features `[sin(2πkt/P), cos(2πkt/P)]` for `k = 1..=order`
pub fn fourier_series(t: f64, period: f64, order: usize) -> Vec<f64> {
    (1..=order)
        .flat_map(|k| {
            let x = 2.0 * PI * k as f64 * t / period;
            [x.sin(), x.cos()]
        })
        .collect()
}
