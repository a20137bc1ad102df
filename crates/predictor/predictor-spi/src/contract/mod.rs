//! Contract module containing trait definitions for prediction

mod regressor;

pub use regressor::Regressor;
