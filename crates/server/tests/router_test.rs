//! Router tests
//!
//! Drives the axum router in-process with stub and JSON-loaded models.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use forecast_facade::prelude::*;
use http_body_util::BodyExt;
use predictor_facade::prelude::*;
use server::{build_router, AppState, ServerConfig, NO_FILE_MESSAGE, UPLOAD_TOO_LARGE_MESSAGE};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "salescast-test-boundary";

/// Predicts `Orders * 100 + 0.456` and counts calls
struct CountingRegressor {
    names: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl Regressor for CountingRegressor {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, frame: &FeatureFrame) -> predictor_facade::Result<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let orders = frame
            .column_index("Orders")
            .ok_or_else(|| PredictorError::UnknownFeature("Orders".to_string()))?;
        Ok(frame.rows().iter().map(|r| r[orders] * 100.0 + 0.456).collect())
    }
}

fn forecaster() -> SalesForecaster {
    let start = NaiveDate::from_ymd_opt(2018, 1, 7).unwrap();
    let history: Vec<String> = (0..73)
        .map(|w| (start + chrono::Duration::weeks(w)).to_string())
        .collect();
    let json = format!(
        r#"{{
            "history": {history:?},
            "y_scale": 22000000.0,
            "trend": {{"k": 0.12, "m": 0.55, "changepoints": [0.25, 0.5, 0.75], "deltas": [0.02, -0.04, 0.01]}},
            "seasonalities": [
                {{"name": "yearly", "period": 365.25, "fourier_order": 1, "beta": [0.03, -0.02]}}
            ],
            "sigma_obs": 0.04
        }}"#
    );
    let model = TrendSeasonalModel::from_json(&json).unwrap();
    SalesForecaster::new(model, 12, Frequency::Weekly)
}

/// State over the counting stub, plus its call counter
fn counted_state() -> (AppState, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let aligner = FeatureAligner::default();
    let regressor = CountingRegressor {
        names: aligner.schema().columns().to_vec(),
        calls: Arc::clone(&calls),
    };
    let state = AppState::new(SalesPredictor::new(aligner, regressor), forecaster());
    (state, calls)
}

fn app_with_counter(render_charts: bool) -> (Router, Arc<AtomicUsize>) {
    let (state, calls) = counted_state();
    (build_router(state.with_charts(render_charts)), calls)
}

fn app() -> Router {
    app_with_counter(false).0
}

fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
    let mut body = String::new();
    for (name, filename, content) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match filename {
            Some(filename) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: text/csv\r\n\r\n"
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
            )),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn upload(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict_csv")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

const CSV: &str = "Store_id,Store_Type,Location_Type,Region_Code,Date,Holiday,Discount,#Order\n\
                   1,S1,L3,R1,2019-06-01,0,Yes,9\n\
                   253,S4,L2,R1,2019-06-01,0,No,60\n";

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_index_renders_forms() {
    let (status, body) = send(app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/predict_csv\""));
    assert!(body.contains("action=\"/predict_manual\""));
}

// ============================================================================
// /predict_csv
// ============================================================================

#[tokio::test]
async fn test_missing_file_is_bad_request_without_prediction() {
    let (app, calls) = app_with_counter(false);
    let request = upload(&[("include_forecast", None, "on")]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), NO_FILE_MESSAGE.as_bytes());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_file_is_bad_request() {
    let (app, calls) = app_with_counter(false);
    let (status, body) = send(app, upload(&[("file", Some(""), "")])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, NO_FILE_MESSAGE);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_non_multipart_request_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict_csv")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, NO_FILE_MESSAGE);
}

#[tokio::test]
async fn test_csv_upload_renders_predictions() {
    let (app, calls) = app_with_counter(false);
    let (status, body) = send(app, upload(&[("file", Some("rows.csv"), CSV)])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(body.contains("<th>Predicted_Sales</th>"));
    assert!(body.contains("<td>900.46</td>"));
    assert!(body.contains("<td>6000.46</td>"));
    assert!(!body.contains("Lower Bound"));
}

#[tokio::test]
async fn test_csv_upload_with_forecast_and_charts() {
    let (app, _) = app_with_counter(true);
    let request = upload(&[("file", Some("rows.csv"), CSV), ("include_forecast", None, "on")]);
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<th>Lower Bound</th>"));
    assert!(body.contains("<td>2019-06-02</td>"));
    assert_eq!(body.matches("data:image/png;base64,").count(), 2);
}

/// Header plus `rows` copies of one valid store row
fn large_csv(rows: usize) -> String {
    let mut csv = String::from("Store_id,Store_Type,Location_Type,Region_Code,Date,Holiday,Discount,#Order\n");
    csv.push_str(&"1,S1,L3,R1,2019-06-01,0,Yes,9\n".repeat(rows));
    csv
}

#[tokio::test]
async fn test_multi_megabyte_csv_is_scored() {
    let (app, calls) = app_with_counter(false);
    let csv = large_csv(110_000);
    assert!(csv.len() > 3 * 1024 * 1024);

    let (status, body) = send(app, upload(&[("file", Some("train.csv"), csv.as_str())])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(body.matches("<td>900.46</td>").count(), 110_000);
}

#[tokio::test]
async fn test_upload_over_limit_is_payload_too_large() {
    let (state, calls) = counted_state();
    let app = build_router(state.with_charts(false).with_upload_limit(4 * 1024));

    let (status, body) = send(app, upload(&[("file", Some("big.csv"), large_csv(1_000).as_str())])).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, UPLOAD_TOO_LARGE_MESSAGE);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_value_is_generic_server_error() {
    let csv = "Store_id,Store_Type,Orders\n1,S1,lots\n";
    let (status, body) = send(app(), upload(&[("file", Some("bad.csv"), csv)])).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
}

// ============================================================================
// /predict_manual
// ============================================================================

#[tokio::test]
async fn test_manual_prediction() {
    let form = "Store_id=1&Store_Type=S2&Location_Type=L1&Region_Code=R3&Holiday=0\
                &Discount=No&Orders=12&Year=2019&Month=6&Week=22&Day=1&DayOfWeek=5&Is_Weekend=1";
    let request = Request::builder()
        .method("POST")
        .uri("/predict_manual")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();

    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>1200.46</td>"));
    assert!(body.contains("<td>S2</td>"));
}

// ============================================================================
// /forecast
// ============================================================================

#[tokio::test]
async fn test_forecast_has_twelve_rows() {
    let (status, body) = send(app(), get("/forecast")).await;
    assert_eq!(status, StatusCode::OK);

    let table_start = body.find("<th>Lower Bound</th>").unwrap();
    let rows = body[table_start..].matches("<tr>").count();
    assert_eq!(rows, 12);
    assert!(body.contains("<td>2019-06-02</td>"));
    assert!(body.contains("<td>2019-08-18</td>"));
}

#[tokio::test]
async fn test_forecast_is_idempotent() {
    let app = app_with_counter(true).0;
    let (_, first) = send(app.clone(), get("/forecast")).await;
    let (_, second) = send(app, get("/forecast")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_forecast_chart_toggle() {
    let app = app_with_counter(true).0;
    let (_, with_chart) = send(app.clone(), get("/forecast")).await;
    let (_, without) = send(app, get("/forecast?chart=false")).await;
    assert!(with_chart.contains("data:image/png;base64,"));
    assert!(!without.contains("data:image/png;base64,"));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let (status, body) = send(app(), get("/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    let live: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(live["status"], "alive");

    let (status, body) = send(app(), get("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    let ready: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(ready["status"], "ready");
    assert_eq!(ready["models"]["regressor"]["features"], 20);
    assert_eq!(ready["models"]["forecaster"]["last_observed"], "2019-05-26");
    assert_eq!(ready["models"]["forecaster"]["periods"], 12);
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn test_state_loads_shipped_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let regressor_path = dir.path().join("xgb_model.json");
    let forecaster_path = dir.path().join("prophet_model.json");
    std::fs::copy(
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/xgb_model.json"),
        &regressor_path,
    )
    .unwrap();
    std::fs::copy(
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/prophet_model.json"),
        &forecaster_path,
    )
    .unwrap();

    let config = ServerConfig {
        regressor_path,
        forecaster_path,
        render_charts: false,
        ..ServerConfig::default()
    };
    let app = build_router(AppState::load(&config).unwrap());

    let (status, body) = send(app.clone(), upload(&[("file", Some("rows.csv"), CSV)])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<th>Predicted_Sales</th>"));

    let (status, body) = send(app, get("/forecast")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>2019-06-02</td>"));
}

#[test]
fn test_state_load_fails_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        regressor_path: dir.path().join("missing.json"),
        ..ServerConfig::default()
    };
    assert!(matches!(
        AppState::load(&config),
        Err(server::StartupError::Predictor(_))
    ));
}
