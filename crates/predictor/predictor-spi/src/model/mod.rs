//! Model module containing data structures

mod feature_frame;
mod prediction_record;
mod raw_row;

pub use feature_frame::FeatureFrame;
pub use prediction_record::{PredictionRecord, PREDICTED_SALES_COLUMN};
pub use raw_row::RawRow;
