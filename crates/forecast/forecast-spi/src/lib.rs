//! Forecast Service Provider Interface
//!
//! Defines traits, models and the error type for horizon forecasting.
//!
//! - [`Forecaster`]: Extends a trained history and forecasts its tail
//! - [`ConfidenceIntervalComputer`]: Turns point forecasts and standard errors into bounds
//! - [`ForecastRecord`]: One dated point forecast with its bounds
//! - [`Frequency`]: Spacing of future periods
//! - [`ForecastError`]: Standardized error type for forecasting

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ConfidenceIntervalComputer, Forecaster};
pub use error::{ForecastError, Result};
pub use model::{ConfidenceInterval, ForecastRecord, Frequency};
