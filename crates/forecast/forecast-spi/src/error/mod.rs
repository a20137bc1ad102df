//! Error types for forecasting operations

mod forecast_error;

pub use forecast_error::{ForecastError, Result};
