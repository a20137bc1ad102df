//! Regressor trait for tabular sales models

use crate::error::Result;
use crate::model::FeatureFrame;

/// A pre-trained model that scores aligned feature rows
///
/// Implementations are loaded once and shared read-only across requests,
/// hence the `Send + Sync` bound.
///
/// # Example
///
/// ```rust,ignore
/// use predictor_spi::{FeatureFrame, Regressor};
///
/// fn score<R: Regressor + ?Sized>(model: &R, frame: &FeatureFrame) -> predictor_spi::Result<f64> {
///     Ok(model.predict(frame)?.iter().sum())
/// }
/// ```
pub trait Regressor: Send + Sync {
    /// Ordered feature columns the model was trained on
    fn feature_names(&self) -> &[String];

    /// Predict one value per row of `frame`
    ///
    /// The frame's columns must match [`Regressor::feature_names`] exactly,
    /// otherwise [`PredictorError::SchemaMismatch`](crate::PredictorError::SchemaMismatch)
    /// is returned.
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>>;
}
