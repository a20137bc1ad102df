//! Integration tests for the forecast stack
//!
//! Exercises the trend/seasonality model through the public API.

use chrono::{Datelike, NaiveDate, Weekday};
use forecast_facade::prelude::*;
use forecast_facade::ForecastWithConfidence;

/// Weekly history from 2018-01-07 to 2019-05-26 (73 Sundays)
fn weekly_model_json() -> String {
    let start = NaiveDate::from_ymd_opt(2018, 1, 7).unwrap();
    let history: Vec<String> = (0..73)
        .map(|w| (start + chrono::Duration::weeks(w)).to_string())
        .collect();
    format!(
        r#"{{
            "history": {history:?},
            "y_scale": 22000000.0,
            "trend": {{"k": 0.12, "m": 0.55, "changepoints": [0.2, 0.4, 0.6, 0.8], "deltas": [0.02, -0.05, 0.01, 0.03]}},
            "seasonalities": [
                {{"name": "yearly", "period": 365.25, "fourier_order": 2, "beta": [0.03, -0.02, 0.01, 0.005]}}
            ],
            "sigma_obs": 0.04
        }}"#
    )
}

fn model() -> TrendSeasonalModel {
    TrendSeasonalModel::from_json(&weekly_model_json()).unwrap()
}

// ============================================================================
// Horizon
// ============================================================================

#[test]
fn test_twelve_weekly_records_after_history() {
    let model = model();
    let records = model.forecast(12, Frequency::Weekly).unwrap();

    assert_eq!(records.len(), 12);
    assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2019, 6, 2).unwrap());
    for pair in records.windows(2) {
        assert_eq!((pair[1].date - pair[0].date).num_days(), 7);
    }
    assert!(records.iter().all(|r| r.date.weekday() == Weekday::Sun));
    assert!(records.iter().all(|r| r.date > model.last_observed()));
}

#[test]
fn test_bounds_bracket_point_forecast() {
    let records = model().forecast(12, Frequency::Weekly).unwrap();
    for r in &records {
        assert!(r.lower <= r.forecast, "{r:?}");
        assert!(r.forecast <= r.upper, "{r:?}");
    }
}

#[test]
fn test_bands_widen_with_horizon() {
    let records = model().forecast(12, Frequency::Weekly).unwrap();
    assert!(records[11].spread() > records[0].spread());
}

#[test]
fn test_forecast_is_repeatable() {
    let model = model();
    let first = model.forecast(12, Frequency::Weekly).unwrap();
    let second = model.forecast(12, Frequency::Weekly).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_full_horizon_contains_history() {
    let model = model();
    let dates = model.make_future_dates(12, Frequency::Weekly);
    assert_eq!(dates.len(), 73 + 12);
    assert_eq!(&dates[..73], model.history());

    let all = model.predict(&dates);
    let tail = model.forecast(12, Frequency::Weekly).unwrap();
    assert_eq!(&all[73..], tail.as_slice());
}

// ============================================================================
// Confidence
// ============================================================================

#[test]
fn test_wider_interval_width_gives_wider_bands() {
    let narrow = model().forecast(1, Frequency::Weekly).unwrap();
    let wide = model()
        .with_interval_width(0.95)
        .unwrap()
        .forecast(1, Frequency::Weekly)
        .unwrap();
    assert_eq!(narrow[0].forecast, wide[0].forecast);
    assert!(wide[0].spread() > narrow[0].spread());
}

#[test]
fn test_from_standard_errors() {
    let result = ForecastWithConfidence::from_standard_errors(vec![10.0, 11.0], &[1.0, 2.0], 0.95);
    assert_eq!(result.forecast.len(), 2);
    for (l, f) in result.lower.iter().zip(result.forecast.iter()) {
        assert!(l < f);
    }
    for (u, f) in result.upper.iter().zip(result.forecast.iter()) {
        assert!(u > f);
    }
}
