//! Contract module containing trait definitions for forecast operations

mod confidence_interval_computer;
mod forecaster;

pub use confidence_interval_computer::ConfidenceIntervalComputer;
pub use forecaster::Forecaster;
