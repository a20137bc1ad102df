//! Forecast Consumer API
//!
//! Consumer configurations and builder APIs for horizon forecasting.
//!
//! This crate provides:
//! - Configuration types for the forecaster and its horizon
//! - [`SalesForecaster`], a loaded model bound to a fixed horizon
//! - Re-exports from SPI and core for convenience

// Re-export from core
pub use forecast_core::{
    calendar, confidence, future_dates, seasonality, trend, ForecastWithConfidence,
    PiecewiseLinearTrend, Seasonality, SeasonalityMode, StandardErrorComputer,
    TrendSeasonalModel,
};

// Re-export traits from SPI
pub use forecast_spi::{
    ConfidenceInterval, ConfidenceIntervalComputer, ForecastError, ForecastRecord, Forecaster,
    Frequency, Result,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default artifact location, relative to the working directory
pub const DEFAULT_FORECASTER_PATH: &str = "models/prophet_model.json";

/// Number of future periods served by default
pub const DEFAULT_PERIODS: usize = 12;

/// Configuration for the forecasting path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Path to the trend/seasonality model JSON
    pub model_path: PathBuf,
    /// Number of future periods to return
    pub periods: usize,
    /// Spacing of future periods
    pub frequency: Frequency,
    /// Overrides the interval width stored in the model
    pub interval_width: Option<f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_FORECASTER_PATH),
            periods: DEFAULT_PERIODS,
            frequency: Frequency::Weekly,
            interval_width: None,
        }
    }
}

/// Builder for ForecastConfig.
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    model_path: Option<PathBuf>,
    periods: Option<usize>,
    frequency: Option<Frequency>,
    interval_width: Option<f64>,
}

impl ForecastConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model path.
    pub fn model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Set the number of periods.
    pub fn periods(mut self, periods: usize) -> Self {
        self.periods = Some(periods);
        self
    }

    /// Set the frequency.
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Set the interval width.
    pub fn interval_width(mut self, width: f64) -> Self {
        self.interval_width = Some(width);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> std::result::Result<ForecastConfig, &'static str> {
        let defaults = ForecastConfig::default();
        let periods = self.periods.unwrap_or(defaults.periods);
        if periods == 0 {
            return Err("periods must be at least 1");
        }
        Ok(ForecastConfig {
            model_path: self.model_path.unwrap_or(defaults.model_path),
            periods,
            frequency: self.frequency.unwrap_or(defaults.frequency),
            interval_width: self.interval_width,
        })
    }
}

/// A loaded forecaster bound to a fixed horizon
pub struct SalesForecaster {
    model: Box<dyn Forecaster>,
    periods: usize,
    frequency: Frequency,
}

impl fmt::Debug for SalesForecaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesForecaster")
            .field("last_observed", &self.model.last_observed())
            .field("periods", &self.periods)
            .field("frequency", &self.frequency)
            .finish()
    }
}

impl SalesForecaster {
    pub fn new(model: impl Forecaster + 'static, periods: usize, frequency: Frequency) -> Self {
        Self {
            model: Box::new(model),
            periods,
            frequency,
        }
    }

    /// Load the trend/seasonality model named by `config`
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        let mut model = TrendSeasonalModel::load(&config.model_path)?;
        if let Some(width) = config.interval_width {
            model = model.with_interval_width(width)?;
        }
        Ok(Self::new(model, config.periods, config.frequency))
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn last_observed(&self) -> NaiveDate {
        self.model.last_observed()
    }

    /// Forecast the configured horizon
    pub fn forecast(&self) -> Result<Vec<ForecastRecord>> {
        let records = self.model.forecast(self.periods, self.frequency)?;
        tracing::debug!(periods = records.len(), frequency = %self.frequency, "forecast computed");
        Ok(records)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ForecastConfig, ForecastConfigBuilder, SalesForecaster, DEFAULT_FORECASTER_PATH,
        DEFAULT_PERIODS,
    };
    pub use forecast_core::{StandardErrorComputer, TrendSeasonalModel};
    pub use forecast_spi::{
        ConfidenceInterval, ForecastError, ForecastRecord, Forecaster, Frequency, Result,
    };
}
