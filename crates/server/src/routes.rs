//! Route handlers

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::response::Html;
use axum::{Form, Json};
use forecast_facade::ForecastRecord;
use predictor_facade::{PredictionRecord, RawRow};
use serde::Deserialize;
use tracing::{debug, info};

use crate::chart;
use crate::config::parse_flag;
use crate::error::AppError;
use crate::render::{Page, Table};
use crate::tabular::read_rows;
use crate::AppState;

type PageResult = Result<Html<String>, AppError>;

/// Empty page with both forms
pub async fn index() -> Html<String> {
    Html(Page::default().render())
}

/// Score an uploaded CSV
pub async fn predict_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> PageResult {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(%rejection, "request is not multipart");
        AppError::NoFile
    })?;

    let mut file = None;
    let mut include_forecast = false;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => file = Some(field.bytes().await?),
            Some("include_forecast") => {
                let value = field.text().await?;
                include_forecast = parse_flag("include_forecast", value).unwrap_or(false);
            }
            _ => {}
        }
    }

    let file = file.filter(|bytes| !bytes.is_empty()).ok_or(AppError::NoFile)?;
    let rows = read_rows(file.as_ref())?;
    info!(rows = rows.len(), include_forecast, "scoring uploaded csv");

    let records = state.predictor.predict(rows)?;
    let mut page = prediction_page(&state, &records)?;
    if include_forecast {
        let forecast = state.forecaster.forecast()?;
        page = forecast_section(&state, page, &forecast, true)?;
    }
    Ok(Html(page.render()))
}

/// Score a single row submitted from the manual entry form
pub async fn predict_manual(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> PageResult {
    let row = RawRow::from_pairs(fields);
    let records = state.predictor.predict(vec![row])?;
    Ok(Html(prediction_page(&state, &records)?.render()))
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    pub chart: Option<bool>,
}

/// Forecast over the configured horizon
pub async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> PageResult {
    let records = state.forecaster.forecast()?;
    let page = forecast_section(&state, Page::default(), &records, query.chart.unwrap_or(true))?;
    Ok(Html(page.render()))
}

fn prediction_page(state: &AppState, records: &[PredictionRecord]) -> Result<Page, AppError> {
    let mut page = Page::default().with_predictions(Table::from_predictions(records));
    if state.render_charts && !records.is_empty() {
        page = page.with_chart("Predicted Sales", chart::predictions_chart(records)?);
    }
    Ok(page)
}

fn forecast_section(
    state: &AppState,
    page: Page,
    records: &[ForecastRecord],
    chart: bool,
) -> Result<Page, AppError> {
    let mut page = page.with_forecast(Table::from_forecast(records));
    if chart && state.render_charts && !records.is_empty() {
        page = page.with_chart("Sales Forecast", chart::forecast_chart(records)?);
    }
    Ok(page)
}

/// Liveness probe
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe, reporting the loaded models
pub async fn readiness(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "models": {
            "regressor": {
                "features": state.predictor.feature_names().len()
            },
            "forecaster": {
                "last_observed": state.forecaster.last_observed().to_string(),
                "periods": state.forecaster.periods(),
                "frequency": state.forecaster.frequency().to_string()
            }
        }
    }))
}
