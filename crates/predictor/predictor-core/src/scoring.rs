//! Regressor serving path: align, predict, round

use crate::features::FeatureAligner;
use predictor_spi::{PredictionRecord, RawRow, Regressor, Result};

/// Round to two decimal places
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score raw rows and attach the rounded prediction to each of them
pub fn predict_records<R: Regressor + ?Sized>(
    aligner: &FeatureAligner,
    model: &R,
    rows: Vec<RawRow>,
) -> Result<Vec<PredictionRecord>> {
    let frame = aligner.align(&rows)?;
    let predictions = model.predict(&frame)?;
    Ok(rows
        .into_iter()
        .zip(predictions)
        .map(|(row, p)| PredictionRecord::new(row, round_to_cents(p)))
        .collect())
}
