//! Forecaster trait for trained trend/seasonality models

use crate::error::Result;
use crate::model::{ForecastRecord, Frequency};
use chrono::NaiveDate;

/// A trained model that projects its history forward
///
/// Implementations hold no per-call state: every call recomputes the full
/// horizon from the trained parameters, so repeated calls agree.
pub trait Forecaster: Send + Sync {
    /// Last date of the training history
    fn last_observed(&self) -> NaiveDate;

    /// Forecast the `periods` dates that follow the history at `frequency`
    fn forecast(&self, periods: usize, frequency: Frequency) -> Result<Vec<ForecastRecord>>;
}
