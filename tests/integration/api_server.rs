//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, record validation and performance computation.


use serde_json::{json, Value};
use std::time::Duration;
use tickersignal::config::Config;
use tickersignal::models::{CrossoverParams, PerformanceReport};

use test_utils::{price_points, ticker_body, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "tickersignal");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("http_requests_in_flight"));
    assert!(body.contains("performance_computations_total"));
}

#[tokio::test]
async fn valid_record_is_stored() {
    let app = TestApiServer::new().await;
    let body = ticker_body(0, "AAPL", 102.4);

    let response = app.server.post("/data").json(&body).await;
    assert_eq!(response.status_code(), 200);

    let stored: Value = response.json();
    assert_eq!(stored["instrument"], "AAPL");
    assert_eq!(stored["close"], 102.4);
    assert_eq!(stored["volume"], 500);

    let listed: Vec<Value> = app.server.get("/data").await.json();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn invalid_datetime_is_rejected() {
    let app = TestApiServer::new().await;
    let mut body = ticker_body(0, "AAPL", 102.4);
    body["datetime"] = json!("28-04-2025 06:00:38");

    let response = app.server.post("/data").json(&body).await;
    assert!(response.status_code().as_u16() > 200);
    assert!(app.server.get("/data").await.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let app = TestApiServer::new().await;
    let mut body = ticker_body(0, "AAPL", 102.4);
    let fields = body.as_object_mut().unwrap();
    fields.remove("volume");
    fields.remove("instrument");

    let response = app.server.post("/data").json(&body).await;
    assert!(response.status_code().as_u16() > 200);
}

#[tokio::test]
async fn invalid_volume_type_is_rejected() {
    let app = TestApiServer::new().await;
    let mut body = ticker_body(0, "AAPL", 102.4);
    body["volume"] = json!("five hundred");

    let response = app.server.post("/data").json(&body).await;
    assert!(response.status_code().as_u16() > 200);
}

#[tokio::test]
async fn duplicate_datetime_conflicts() {
    let app = TestApiServer::new().await;
    let body = ticker_body(0, "AAPL", 102.4);
    assert_eq!(app.server.post("/data").json(&body).await.status_code(), 200);

    let response = app.server.post("/data").json(&body).await;
    assert_eq!(response.status_code(), 409);
    let error: Value = response.json();
    assert_eq!(error["error"], "conflict");
}

#[tokio::test]
async fn performance_over_request_series() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/performance")
        .json(&json!({
            "prices": price_points(&[100.0, 105.0, 102.0, 108.0, 110.0]),
            "short_window": 2,
            "long_window": 5,
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let report: PerformanceReport = response.json();
    assert_eq!(report.buy_signals, 1);
    assert_eq!(report.sell_signals, 0);
    assert_eq!(report.number_of_trades, 1);
    assert_eq!(report.total_return, 0.0);
}

#[tokio::test]
async fn performance_uses_configured_windows_by_default() {
    let config = Config {
        crossover: CrossoverParams::new(2, 4),
        ..Config::default()
    };
    let app = TestApiServer::with_config(config).await;
    let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();

    let response = app
        .server
        .post("/api/performance")
        .json(&json!({ "prices": price_points(&closes) }))
        .await;
    assert_eq!(response.status_code(), 200);

    let report: PerformanceReport = response.json();
    assert_eq!(report.buy_signals, 7);
    assert!(report.total_return > 0.0);
}

#[tokio::test]
async fn insufficient_data_is_unprocessable() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/performance")
        .json(&json!({ "prices": price_points(&[100.0, 101.0, 102.0]) }))
        .await;
    assert_eq!(response.status_code(), 422);

    let error: Value = response.json();
    assert_eq!(error["error"], "insufficient_data");

    let metrics = app.server.get("/metrics").await.text();
    assert!(metrics.contains("performance_computation_failures_total{kind=\"insufficient_data\"} 1"));
}

#[tokio::test]
async fn zero_price_is_bad_request() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/performance")
        .json(&json!({
            "prices": price_points(&[100.0, 0.0, 102.0, 103.0]),
            "short_window": 1,
            "long_window": 2,
        }))
        .await;
    assert_eq!(response.status_code(), 400);

    let error: Value = response.json();
    assert_eq!(error["error"], "invalid_price");
}

#[tokio::test]
async fn invalid_windows_are_bad_request() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/performance")
        .json(&json!({
            "prices": price_points(&[100.0, 101.0, 102.0]),
            "short_window": 3,
            "long_window": 2,
        }))
        .await;
    assert_eq!(response.status_code(), 400);

    let error: Value = response.json();
    assert_eq!(error["error"], "invalid_window");
}

#[tokio::test]
async fn expired_deadline_is_unavailable() {
    let config = Config {
        compute_timeout: Duration::ZERO,
        ..Config::default()
    };
    let app = TestApiServer::with_config(config).await;
    let response = app
        .server
        .post("/api/performance")
        .json(&json!({
            "prices": price_points(&[100.0, 101.0, 102.0]),
            "short_window": 1,
            "long_window": 2,
        }))
        .await;
    assert_eq!(response.status_code(), 503);

    let error: Value = response.json();
    assert_eq!(error["error"], "deadline_exceeded");
}

#[tokio::test]
async fn performance_over_stored_instrument() {
    let app = TestApiServer::new().await;
    let closes = [100.0, 105.0, 102.0, 108.0, 110.0];
    // insert out of order; the repository returns them by datetime
    for (day, close) in closes.iter().enumerate().rev() {
        let response = app
            .server
            .post("/data")
            .json(&ticker_body(day as i64, "AAPL", *close))
            .await;
        assert_eq!(response.status_code(), 200);
    }
    app.server
        .post("/data")
        .json(&ticker_body(10, "MSFT", 300.0))
        .await;

    let response = app
        .server
        .get("/api/performance/AAPL")
        .add_query_param("short_window", 2)
        .add_query_param("long_window", 5)
        .await;
    assert_eq!(response.status_code(), 200);

    let report: PerformanceReport = response.json();
    assert_eq!(report.buy_signals, 1);
    assert_eq!(report.number_of_trades, 1);
}

#[tokio::test]
async fn unknown_instrument_has_insufficient_data() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/performance/TSLA").await;
    assert_eq!(response.status_code(), 422);
}
