use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use copyflow_client::{
    api::{
        client::{HttpApi, ProductRequest, RecommendationApi},
        error::ApiError,
    },
    connectivity::monitor::{ConnectivityMonitor, ConnectivityStatus},
    result::normalizer::normalize,
};

use crate::common::server::{StubServer, refused_base_url};

mod common;

fn mug_request() -> ProductRequest {
    ProductRequest {
        name: "Smart Mug".into(),
        category: "Kitchen".into(),
        description: "Keeps drinks hot".into(),
        price: "24.99".into(),
        target_audience: "B2C".into(),
    }
}

fn health_ok() -> Router {
    Router::new().route(
        "/api/health",
        get(|| async {
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "models": "loaded",
                "models_loading": false,
                "models_loaded": true
            }))
        }),
    )
}

// =========================================================================
// Health
// =========================================================================

#[test]
fn healthy_service_is_connected() {
    let server = StubServer::spawn(health_ok());
    let api = HttpApi::new(&server.base_url()).unwrap();
    let mut monitor = ConnectivityMonitor::new();

    assert_eq!(monitor.probe(&api), ConnectivityStatus::Connected);
    let report = monitor.last_report().unwrap();
    assert_eq!(report.status.as_deref(), Some("healthy"));
    assert_eq!(report.models_loaded, Some(true));
}

#[test]
fn degraded_but_answering_service_is_connected() {
    let server = StubServer::spawn(Router::new().route(
        "/api/health",
        get(|| async { Json(json!({"status": "unhealthy", "error": "db down"})) }),
    ));
    let api = HttpApi::new(&server.base_url()).unwrap();

    let report = api.health().unwrap();
    assert!(report.is_degraded());
    assert_eq!(report.error.as_deref(), Some("db down"));
}

#[test]
fn health_server_error_is_error_status() {
    let server = StubServer::spawn(Router::new().route(
        "/api/health",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ));
    let api = HttpApi::new(&server.base_url()).unwrap();
    let mut monitor = ConnectivityMonitor::new();

    assert_eq!(monitor.probe(&api), ConnectivityStatus::Error);
}

#[test]
fn refused_connection_is_disconnected() {
    let api = HttpApi::new(&refused_base_url()).unwrap();
    let mut monitor = ConnectivityMonitor::new();

    assert_eq!(monitor.probe(&api), ConnectivityStatus::Disconnected);
    assert!(monitor.last_report().is_none());
}

#[test]
fn trailing_slash_in_base_url_is_ignored() {
    let server = StubServer::spawn(health_ok());
    let api = HttpApi::new(&format!("{}/", server.base_url())).unwrap();

    assert_eq!(api.url("/health"), format!("{}/health", server.base_url()));
    assert!(api.health().is_ok());
}

// =========================================================================
// Strategy requests
// =========================================================================

#[test]
fn request_body_carries_all_form_fields() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let captured = seen.clone();

    let server = StubServer::spawn(Router::new().route(
        "/api/generate-marketing-strategy",
        post(move |Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                *captured.lock().unwrap() = Some(body);
                Json(json!({"input_product": {"name": "Smart Mug"}}))
            }
        }),
    ));
    let api = HttpApi::new(&server.base_url()).unwrap();

    api.generate_strategy(&mug_request()).unwrap();

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(
        body,
        json!({
            "name": "Smart Mug",
            "category": "Kitchen",
            "description": "Keeps drinks hot",
            "price": "24.99",
            "target_audience": "B2C"
        })
    );
}

#[test]
fn partial_success_is_normalized() {
    let server = StubServer::spawn(Router::new().route(
        "/api/generate-marketing-strategy",
        post(|| async {
            Json(json!({
                "input_product": {"name": "Smart Mug", "category": "Kitchen"},
                "similar_products": [],
                "marketing_strategy": {"core_message": "Hot coffee, all morning"}
            }))
        }),
    ));
    let api = HttpApi::new(&server.base_url()).unwrap();

    let raw = api.generate_strategy(&mug_request()).unwrap();
    let result = normalize(&raw);

    assert_eq!(result.input_product.name, "Smart Mug");
    assert_eq!(result.similar_products.len(), 3);
    assert_eq!(result.marketing_strategy.core_message, "Hot coffee, all morning");
    assert_eq!(result.marketing_strategy.target_tones.len(), 3);
    assert!(result.platform_content.contains_key("Instagram"));
}

#[test]
fn validation_error_carries_detail() {
    let server = StubServer::spawn(Router::new().route(
        "/api/generate-marketing-strategy",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": "description too short"})),
            )
        }),
    ));
    let api = HttpApi::new(&server.base_url()).unwrap();

    let err = api.generate_strategy(&mug_request()).unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 422,
            detail: Some("description too short".into())
        }
    );
    assert_eq!(err.user_message(), "description too short");
}

#[test]
fn server_error_without_detail_uses_status_message() {
    let server = StubServer::spawn(Router::new().route(
        "/api/generate-marketing-strategy",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ));
    let api = HttpApi::new(&server.base_url()).unwrap();

    let err = api.generate_strategy(&mug_request()).unwrap_err();
    assert_eq!(err.user_message(), "HTTP error! status: 500");
}

#[test]
fn non_json_success_body_is_decode_error() {
    let server = StubServer::spawn(Router::new().route(
        "/api/generate-marketing-strategy",
        post(|| async { "<html>ok</html>" }),
    ));
    let api = HttpApi::new(&server.base_url()).unwrap();

    let err = api.generate_strategy(&mug_request()).unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(!err.is_transport());
}

#[test]
fn unreachable_service_is_transport_error() {
    let api = HttpApi::new(&refused_base_url()).unwrap();

    let err = api.generate_strategy(&mug_request()).unwrap_err();
    assert!(err.is_transport());
    assert!(!err.user_message().is_empty());
}
