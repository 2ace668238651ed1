//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::Config;
use crate::error::PerformanceError;
use crate::metrics::Metrics;
use crate::models::market::{price_series, PricePoint, TickerData};
use crate::models::performance::{CrossoverParams, PerformanceReport};
use crate::services::market_data::{InMemoryTickerRepository, RepositoryError, TickerRepository};
use crate::signals::engine::compute_performance_before;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub repository: Arc<dyn TickerRepository>,
    pub crossover: CrossoverParams,
    pub compute_timeout: Duration,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn TickerRepository>,
        config: &Config,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            metrics: Arc::new(Metrics::new()?),
            start_time: Arc::new(Instant::now()),
            repository,
            crossover: config.crossover,
            compute_timeout: config.compute_timeout,
        })
    }
}

/// Failures surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Performance(#[from] PerformanceError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Performance(PerformanceError::InsufficientData { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Performance(PerformanceError::InvalidPrice { .. })
            | ApiError::Performance(PerformanceError::InvalidWindow { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Performance(PerformanceError::DeadlineExceeded) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Performance(e) => e.kind(),
            ApiError::Repository(RepositoryError::Conflict(_)) => "conflict",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

/// Liveness only: the process answers, so it is healthy.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": "tickersignal"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub short_window: Option<usize>,
    pub long_window: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PerformanceRequest {
    pub prices: Vec<PricePoint>,
    #[serde(default)]
    pub short_window: Option<usize>,
    #[serde(default)]
    pub long_window: Option<usize>,
}

/// List every stored record
async fn list_data(State(state): State<AppState>) -> Result<Json<Vec<TickerData>>, ApiError> {
    let records = state.repository.list().await?;
    Ok(Json(records))
}

/// Store a single OHLCV record
async fn create_data(
    State(state): State<AppState>,
    Json(record): Json<TickerData>,
) -> Result<Json<TickerData>, ApiError> {
    let stored = state.repository.insert(record).await.map_err(|e| {
        warn!(error = %e, "Rejected ticker record");
        e
    })?;
    Ok(Json(stored))
}

/// Compute performance over a price series supplied in the request body
async fn evaluate_performance(
    State(state): State<AppState>,
    Json(request): Json<PerformanceRequest>,
) -> Result<Json<PerformanceReport>, ApiError> {
    let deadline = Instant::now() + state.compute_timeout;
    let params = state
        .crossover
        .with_overrides(request.short_window, request.long_window);
    run_computation(&state, &request.prices, &params, deadline, None)
}

/// Compute performance over the stored records of one instrument
async fn instrument_performance(
    State(state): State<AppState>,
    Path(instrument): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<PerformanceReport>, ApiError> {
    let deadline = Instant::now() + state.compute_timeout;
    let params = state
        .crossover
        .with_overrides(query.short_window, query.long_window);
    let records = state.repository.series_for(&instrument).await?;
    let series = price_series(&records);
    run_computation(&state, &series, &params, deadline, Some(&instrument))
}

fn run_computation(
    state: &AppState,
    series: &[PricePoint],
    params: &CrossoverParams,
    deadline: Instant,
    instrument: Option<&str>,
) -> Result<Json<PerformanceReport>, ApiError> {
    match compute_performance_before(series, params, deadline) {
        Ok(report) => {
            state.metrics.performance_computations_total.inc();
            Ok(Json(report))
        }
        Err(e) => {
            warn!(
                instrument = instrument.unwrap_or("-"),
                len = series.len(),
                short_window = params.short_window,
                long_window = params.long_window,
                kind = e.kind(),
                error = %e,
                "Performance computation rejected"
            );
            state.metrics.record_failure(e.kind());
            Err(e.into())
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/data", get(list_data).post(create_data))
        .route("/api/performance", post(evaluate_performance))
        .route("/api/performance/{instrument}", get(instrument_performance))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let repository: Arc<dyn TickerRepository> = Arc::new(InMemoryTickerRepository::new());
    let state = AppState::new(repository, &config)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        short_window = config.crossover.short_window,
        long_window = config.crossover.long_window,
        "Default crossover windows"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
