//! Piecewise-linear trend with additive/multiplicative seasonality
//!
//! The model is read from a JSON document produced at training time:
//!
//! ```text
//! {
//!   "history": ["2018-01-07", ..., "2019-05-26"],
//!   "y_scale": 1250000.0,
//!   "trend": {"k": 0.08, "m": 0.42, "changepoints": [0.2, 0.5], "deltas": [0.01, -0.02]},
//!   "seasonalities": [{"name": "yearly", "period": 365.25, "fourier_order": 10, "beta": [...]}],
//!   "sigma_obs": 0.03,
//!   "interval_width": 0.8
//! }
//! ```
//!
//! Time is scaled so the first history date is `t = 0` and the last is
//! `t = 1`. Trend and additive terms are multiplied by `y_scale`; `floor` is
//! added back to the trend.
//!
//! Interval bounds are closed-form rather than simulated. Beyond the
//! history, future changepoints arrive at the historical rate with
//! Laplace-distributed rate changes, whose variance adds to the observation
//! noise. Bounds are symmetric around the point forecast.

use crate::calendar::future_dates;
use crate::confidence::StandardErrorComputer;
use crate::seasonality::{Seasonality, SeasonalityMode};
use chrono::NaiveDate;
use forecast_spi::{
    ConfidenceIntervalComputer, ForecastError, ForecastRecord, Forecaster, Frequency, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

fn default_interval_width() -> f64 {
    0.8
}

/// Growth rate `k`, offset `m` and rate changes at scaled changepoint times
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PiecewiseLinearTrend {
    pub k: f64,
    pub m: f64,
    #[serde(default)]
    pub changepoints: Vec<f64>,
    #[serde(default)]
    pub deltas: Vec<f64>,
}

impl PiecewiseLinearTrend {
    /// Trend value at scaled time `t`
    pub fn at(&self, t: f64) -> f64 {
        let (k, m) = self
            .changepoints
            .iter()
            .zip(&self.deltas)
            .filter(|&(&cp, _)| t >= cp)
            .fold((self.k, self.m), |(k, m), (&cp, &delta)| {
                (k + delta, m - cp * delta)
            });
        k * t + m
    }

    /// Variance of the trend at `t` from changepoints not yet observed
    ///
    /// Changepoints arrive at `n / 1` per unit of scaled time with
    /// Laplace(0, b) rate changes, `b = mean |delta|`. A change at `s`
    /// shifts the trend by `delta * (t - s)`, so integrating over `(1, t]`
    /// gives `rate * 2b² * (t - 1)³ / 3`.
    pub fn future_variance(&self, t: f64) -> f64 {
        if t <= 1.0 || self.deltas.is_empty() {
            return 0.0;
        }
        let rate = self.changepoints.len() as f64;
        let b = self.deltas.iter().map(|d| d.abs()).sum::<f64>() / self.deltas.len() as f64;
        rate * 2.0 * b * b * (t - 1.0).powi(3) / 3.0
    }
}

/// Trained trend/seasonality forecaster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeasonalModel {
    history: Vec<NaiveDate>,
    y_scale: f64,
    #[serde(default)]
    floor: f64,
    trend: PiecewiseLinearTrend,
    #[serde(default)]
    seasonalities: Vec<Seasonality>,
    sigma_obs: f64,
    #[serde(default = "default_interval_width")]
    interval_width: f64,
    #[serde(skip)]
    intervals: StandardErrorComputer,
}

impl TrendSeasonalModel {
    /// Parse and validate a model document
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self =
            serde_json::from_str(json).map_err(|e| ForecastError::InvalidModel(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Read a model document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let model = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            history = model.history.len(),
            seasonalities = model.seasonalities.len(),
            "loaded forecaster"
        );
        Ok(model)
    }

    /// Override the interval width stored in the artifact
    pub fn with_interval_width(mut self, width: f64) -> Result<Self> {
        check_interval_width(width)?;
        self.interval_width = width;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.history.len() < 2 {
            return Err(ForecastError::InsufficientData {
                required: 2,
                actual: self.history.len(),
            });
        }
        if self.history.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ForecastError::InvalidModel(
                "history dates must be strictly increasing".to_string(),
            ));
        }
        if self.trend.changepoints.len() != self.trend.deltas.len() {
            return Err(ForecastError::InvalidModel(format!(
                "{} changepoints but {} deltas",
                self.trend.changepoints.len(),
                self.trend.deltas.len()
            )));
        }
        if !self.y_scale.is_finite() || !self.floor.is_finite() {
            return Err(ForecastError::InvalidParameter {
                name: "y_scale".to_string(),
                reason: "must be finite".to_string(),
            });
        }
        if !(self.sigma_obs.is_finite() && self.sigma_obs >= 0.0) {
            return Err(ForecastError::InvalidParameter {
                name: "sigma_obs".to_string(),
                reason: "must be a non-negative number".to_string(),
            });
        }
        check_interval_width(self.interval_width)?;
        self.seasonalities.iter().try_for_each(Seasonality::validate)
    }

    pub fn history(&self) -> &[NaiveDate] {
        &self.history
    }

    pub fn interval_width(&self) -> f64 {
        self.interval_width
    }

    /// Scaled time of `date`: 0 at the first history date, 1 at the last
    pub fn scaled_time(&self, date: NaiveDate) -> f64 {
        let start = self.history[0];
        let span = (self.history[self.history.len() - 1] - start).num_days() as f64;
        (date - start).num_days() as f64 / span
    }

    /// History dates followed by `periods` future dates
    pub fn make_future_dates(&self, periods: usize, frequency: Frequency) -> Vec<NaiveDate> {
        let mut dates = self.history.clone();
        dates.extend(future_dates(self.last_observed(), periods, frequency));
        dates
    }

    /// Point forecast and bounds for every date
    pub fn predict(&self, dates: &[NaiveDate]) -> Vec<ForecastRecord> {
        let mut yhat = Vec::with_capacity(dates.len());
        let mut std_errors = Vec::with_capacity(dates.len());

        for &date in dates {
            let t = self.scaled_time(date);
            let trend = self.trend.at(t) * self.y_scale + self.floor;

            let (mut additive, mut multiplicative) = (0.0, 0.0);
            for s in &self.seasonalities {
                match s.mode {
                    SeasonalityMode::Additive => additive += s.evaluate(date),
                    SeasonalityMode::Multiplicative => multiplicative += s.evaluate(date),
                }
            }

            yhat.push(trend * (1.0 + multiplicative) + additive * self.y_scale);
            let variance = self.sigma_obs.powi(2) + self.trend.future_variance(t);
            std_errors.push(variance.sqrt() * self.y_scale.abs());
        }

        let ci = self
            .intervals
            .compute(&yhat, &std_errors, self.interval_width);

        dates
            .iter()
            .zip(ci.forecast)
            .zip(ci.lower.into_iter().zip(ci.upper))
            .map(|((&date, forecast), (lower, upper))| ForecastRecord {
                date,
                forecast,
                lower,
                upper,
            })
            .collect()
    }
}

impl Forecaster for TrendSeasonalModel {
    fn last_observed(&self) -> NaiveDate {
        self.history[self.history.len() - 1]
    }

    fn forecast(&self, periods: usize, frequency: Frequency) -> Result<Vec<ForecastRecord>> {
        let dates = self.make_future_dates(periods, frequency);
        let mut records = self.predict(&dates);
        let keep = periods.min(records.len());
        Ok(records.split_off(records.len() - keep))
    }
}

fn check_interval_width(width: f64) -> Result<()> {
    if (0.5..1.0).contains(&width) {
        Ok(())
    } else {
        Err(ForecastError::InvalidParameter {
            name: "interval_width".to_string(),
            reason: "must be in [0.5, 1)".to_string(),
        })
    }
}
