//! Model module containing data structures

mod confidence_interval;
mod forecast_record;
mod frequency;

pub use confidence_interval::ConfidenceInterval;
pub use forecast_record::ForecastRecord;
pub use frequency::Frequency;
