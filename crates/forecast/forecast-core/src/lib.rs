//! Forecast Core
//!
//! Core implementations for horizon forecasting: the piecewise-linear trend
//! with Fourier seasonality, the future calendar and interval bounds.

pub mod calendar;
pub mod confidence;
pub mod seasonality;
pub mod trend;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    ConfidenceInterval, ConfidenceIntervalComputer, ForecastError, ForecastRecord, Forecaster,
    Frequency, Result,
};

// Re-export main types
pub use calendar::future_dates;
pub use confidence::{ForecastWithConfidence, StandardErrorComputer};
pub use seasonality::{Seasonality, SeasonalityMode};
pub use trend::{PiecewiseLinearTrend, TrendSeasonalModel};
