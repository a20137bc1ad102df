//! Dated forecast output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One future period: point forecast and interval bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub date: NaiveDate,
    pub forecast: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ForecastRecord {
    /// Width of the interval
    pub fn spread(&self) -> f64 {
        self.upper - self.lower
    }
}
