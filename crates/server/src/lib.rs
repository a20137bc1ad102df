//! # server
//!
//! HTML front-end for sales prediction and forecasting. Models are loaded
//! once at startup and shared read-only across requests.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use forecast_facade::SalesForecaster;
use predictor_facade::SalesPredictor;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod chart;
pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod tabular;
pub mod telemetry;

pub use config::{ConfigError, ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
pub use error::{AppError, StartupError, NO_FILE_MESSAGE, UPLOAD_TOO_LARGE_MESSAGE};

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub predictor: Arc<SalesPredictor>,
    pub forecaster: Arc<SalesForecaster>,
    pub render_charts: bool,
    /// Body cap for `/predict_csv`; `0` disables it
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(predictor: SalesPredictor, forecaster: SalesForecaster) -> Self {
        Self {
            predictor: Arc::new(predictor),
            forecaster: Arc::new(forecaster),
            render_charts: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_charts(mut self, render_charts: bool) -> Self {
        self.render_charts = render_charts;
        self
    }

    pub fn with_upload_limit(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Load both model artifacts named by `config`
    pub fn load(config: &ServerConfig) -> Result<Self, StartupError> {
        let predictor = SalesPredictor::from_config(&config.regressor())?;
        let forecaster = SalesForecaster::from_config(&config.forecast())?;
        Ok(Self::new(predictor, forecaster)
            .with_charts(config.render_charts)
            .with_upload_limit(config.max_upload_bytes))
    }
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = match state.max_upload_bytes {
        0 => DefaultBodyLimit::disable(),
        limit => DefaultBodyLimit::max(limit),
    };

    Router::new()
        .route("/", get(routes::index))
        .route("/predict_csv", post(routes::predict_csv).layer(upload_limit))
        .route("/predict_manual", post(routes::predict_manual))
        .route("/forecast", get(routes::forecast))
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load the models and serve until the listener fails
pub async fn serve(config: ServerConfig) -> Result<(), StartupError> {
    let addr = config.socket_addr()?;
    let state = AppState::load(&config)?;
    let app = build_router(state);

    info!("salescast server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
