//! Server configuration
//!
//! Defaults match the layout the models are shipped in; every field can be
//! overridden from the environment (an optional `.env` file is loaded first
//! by the binaries).

use forecast_facade::{ForecastConfig, Frequency, DEFAULT_FORECASTER_PATH, DEFAULT_PERIODS};
use predictor_facade::{RegressorConfig, DEFAULT_REGRESSOR_PATH};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Default cap on a `/predict_csv` request body
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held an unusable value
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// Host and port do not form a socket address
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),
}

/// Settings for the HTTP front-end
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub regressor_path: PathBuf,
    pub forecaster_path: PathBuf,
    /// Future periods served by `/forecast`
    pub forecast_periods: usize,
    /// Embed PNG charts in result pages
    pub render_charts: bool,
    /// Largest accepted upload body; `0` disables the cap
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            regressor_path: PathBuf::from(DEFAULT_REGRESSOR_PATH),
            forecaster_path: PathBuf::from(DEFAULT_FORECASTER_PATH),
            forecast_periods: DEFAULT_PERIODS,
            render_charts: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Read overrides from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse("PORT", port)?;
        }
        if let Some(path) = lookup("REGRESSOR_PATH") {
            config.regressor_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("FORECASTER_PATH") {
            config.forecaster_path = PathBuf::from(path);
        }
        if let Some(periods) = lookup("FORECAST_PERIODS") {
            config.forecast_periods = parse("FORECAST_PERIODS", periods)?;
            if config.forecast_periods == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "FORECAST_PERIODS",
                    value: "0".to_string(),
                });
            }
        }
        if let Some(flag) = lookup("RENDER_CHARTS") {
            config.render_charts = parse_flag("RENDER_CHARTS", flag)?;
        }
        if let Some(limit) = lookup("MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = parse("MAX_UPLOAD_BYTES", limit)?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }

    pub fn regressor(&self) -> RegressorConfig {
        RegressorConfig::new(&self.regressor_path)
    }

    /// Weekly horizon over the configured number of periods
    pub fn forecast(&self) -> ForecastConfig {
        ForecastConfig {
            model_path: self.forecaster_path.clone(),
            periods: self.forecast_periods,
            frequency: Frequency::Weekly,
            interval_width: None,
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

/// Accepts the usual spellings of a boolean switch
pub(crate) fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.regressor_path, PathBuf::from("models/xgb_model.json"));
        assert_eq!(config.forecaster_path, PathBuf::from("models/prophet_model.json"));
        assert_eq!(config.forecast_periods, 12);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "5000"),
            ("REGRESSOR_PATH", "/srv/xgb.json"),
            ("FORECAST_PERIODS", "8"),
            ("RENDER_CHARTS", "off"),
            ("MAX_UPLOAD_BYTES", "1048576"),
        ]))
        .unwrap();

        assert_eq!(config.max_upload_bytes, 1024 * 1024);

        assert_eq!(config.port, 5000);
        assert_eq!(config.regressor_path, PathBuf::from("/srv/xgb.json"));
        assert_eq!(config.forecast_periods, 8);
        assert!(!config.render_charts);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn test_invalid_upload_limit() {
        let err = ServerConfig::from_lookup(lookup(&[("MAX_UPLOAD_BYTES", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "MAX_UPLOAD_BYTES", .. }));
    }

    #[test]
    fn test_zero_periods_rejected() {
        assert!(ServerConfig::from_lookup(lookup(&[("FORECAST_PERIODS", "0")])).is_err());
    }

    #[test]
    fn test_invalid_address() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.socket_addr(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_forecast_config_is_weekly() {
        let config = ServerConfig::default().forecast();
        assert_eq!(config.frequency, Frequency::Weekly);
        assert_eq!(config.periods, 12);
    }
}
