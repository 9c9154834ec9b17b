use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chart_ingestor::{RunReport, requests::OrchestrationError};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::{AppState, html::render_report};

pub const SERVICE_NAME: &str = "Chart-IMG Webhook Service";
pub const API_STRATEGY: &str = "v2 for all timeframes with extended hours";
pub const TICKER_HINT: &str = r#"Send {"ticker": "NVDA"}"#;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health).options(preflight))
        .route("/generate-charts", post(generate_charts).options(preflight))
        .route("/test/{ticker}", get(test_page).options(preflight))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

/// Pulls the ticker out of a webhook body: top-level `ticker`, then
/// `body.ticker` (n8n wraps forwarded payloads), then `symbol`.
/// Only non-empty strings count.
pub fn extract_ticker(payload: &Value) -> Option<String> {
    [
        payload.get("ticker"),
        payload.get("body").and_then(|b| b.get("ticker")),
        payload.get("symbol"),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .find(|s| !s.is_empty())
    .map(str::to_string)
}

/// Failures a handler reports to the caller.
enum WebhookError {
    MissingTicker,
    Orchestration { error: String, ticker: String },
}

impl WebhookError {
    fn from_run(err: OrchestrationError, ticker: &str) -> Self {
        match err {
            OrchestrationError::EmptyTicker => WebhookError::MissingTicker,
            other => {
                error!("Webhook error: {other}");
                WebhookError::Orchestration {
                    error: other.to_string(),
                    ticker: ticker.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match self {
            WebhookError::MissingTicker => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "No ticker provided",
                    "hint": TICKER_HINT,
                })),
            )
                .into_response(),
            WebhookError::Orchestration { error, ticker } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": error,
                    "ticker": ticker,
                })),
            )
                .into_response(),
        }
    }
}

async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// Answers CORS preflight requests for any origin, allowing whatever
/// headers the browser asks for.
async fn preflight(headers: HeaderMap) -> Response {
    let allow_headers = headers
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));

    let mut response = StatusCode::NO_CONTENT.into_response();
    let out = response.headers_mut();
    out.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    out.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
    out.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
    response
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "api_key_configured": state.api_key_configured,
        "output_directory": state.output_dir.display().to_string(),
        "version": env!("CARGO_PKG_VERSION"),
        "api_strategy": API_STRATEGY,
    }))
}

/// Body is parsed leniently: anything that is not a JSON object is treated
/// as an empty one.
async fn generate_charts(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RunReport>, WebhookError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let ticker = extract_ticker(&payload).ok_or(WebhookError::MissingTicker)?;
    info!("Webhook request for ticker {ticker}");

    let report = state
        .orchestrator
        .run(&ticker)
        .await
        .map_err(|e| WebhookError::from_run(e, &ticker))?;
    Ok(Json(report))
}

async fn test_page(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Response, WebhookError> {
    let report = state
        .orchestrator
        .run(&ticker)
        .await
        .map_err(|e| WebhookError::from_run(e, &ticker))?;

    if report.success_count == 0 {
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(report)).into_response());
    }
    Ok(Html(render_report(&ticker, &report, &state.output_dir)).into_response())
}
