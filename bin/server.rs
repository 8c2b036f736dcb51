// PTO Forecast - Web Server
// REST API with Axum around the forecast engine

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use clap::Parser;
use pto_forecast::{
    federal_holiday_list, logging, parse_date, ForecastEngine, ForecastError, ForecastRequest,
    HolidayResponse, ServerConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pto-server", version, about = "HTTP API for PTO balance forecasts")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    config: ServerConfig,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    engine: Arc<ForecastEngine>,
    default_holiday_hours: f64,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

fn bad_request(err: ForecastError) -> Response {
    warn!(error = %err, "rejecting request");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::err(err.to_string())),
    )
        .into_response()
}

#[derive(Deserialize)]
struct HolidayQuery {
    start: String,
    end: String,
    hours: Option<f64>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /forecast - Run a forecast; the body is returned unwrapped
async fn forecast(State(state): State<AppState>, Json(request): Json<ForecastRequest>) -> Response {
    let today = Local::now().date_naive();

    match request.run(&state.engine, today) {
        Ok(response) => {
            info!(today = %today, days = response.balances.len(), "forecast served");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => bad_request(e),
    }
}

/// GET /api/holidays?start=YYYY-MM-DD&end=YYYY-MM-DD - Federal holidays in a window
async fn get_holidays(State(state): State<AppState>, Query(query): Query<HolidayQuery>) -> Response {
    let parse = |field: &str, value: &str| -> Result<NaiveDate, ForecastError> {
        parse_date(value).ok_or_else(|| ForecastError::invalid_date(field, value))
    };

    let window = parse("start", &query.start).and_then(|start| Ok((start, parse("end", &query.end)?)));
    let hours = query.hours.unwrap_or(state.default_holiday_hours);

    match window.and_then(|(start, end)| federal_holiday_list(start, end, hours)) {
        Ok(holidays) => {
            let response: Vec<HolidayResponse> = holidays.iter().map(HolidayResponse::from).collect();
            (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
        }
        Err(e) => bad_request(e),
    }
}

fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/holidays", get(get_holidays))
        .with_state(state.clone());

    Router::new()
        .route("/forecast", post(forecast))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let state = AppState {
        engine: Arc::new(cli.config.engine()),
        default_holiday_hours: cli.config.default_holiday_hours,
    };

    let listener = tokio::net::TcpListener::bind(&cli.config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", cli.config.bind, e))?;

    info!(bind = %cli.config.bind, "PTO forecast server listening");
    println!("🚀 Server running on http://{}", cli.config.bind);
    println!("   API: POST http://{}/forecast", cli.config.bind);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            engine: Arc::new(ForecastEngine::new()),
            default_holiday_hours: 8.0,
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_forecast_rejects_unknown_schedule() {
        let payload = json!({
            "schedule": "quarterly",
            "next_pay_date": "2030-01-04",
            "end_date": "2030-02-01"
        });
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/forecast")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("quarterly"));
    }

    #[tokio::test]
    async fn test_forecast_returns_contract_keys() {
        let today = Local::now().date_naive();
        let end = today + chrono::Days::new(30);
        let payload = json!({
            "pto_today": 10,
            "accrual_rate": 4,
            "schedule": "weekly",
            "next_pay_date": today.to_string(),
            "end_date": end.to_string(),
            "holidays": []
        });
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/forecast")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["balances"].as_object().unwrap().len(), 31);
        assert_eq!(body["accrued_total"], 20.0);
        assert_eq!(body["planned_total"], 0.0);
        assert_eq!(body["holiday_total"], 0.0);
        assert!(body["holidays"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_holidays_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/holidays?start=2022-12-30&end=2023-01-04")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"][0]["date"], "2023-01-02");
        assert_eq!(body["data"][0]["name"], "New Year's Day");
    }

    #[tokio::test]
    async fn test_holidays_endpoint_rejects_inverted_window() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/holidays?start=2024-12-31&end=2024-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
