//! Health and readiness endpoints.

use std::sync::Arc;

use actix_web::test;
use serde_json::Value;

use super::test_helpers::{RecordingObserver, StubFetcher, create_test_app, default_settings};

#[actix_web::test]
async fn test_health() {
    let app = create_test_app(
        Arc::new(StubFetcher::new()),
        Arc::new(RecordingObserver::default()),
        default_settings(),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_ready_reports_backend() {
    let app = create_test_app(
        Arc::new(StubFetcher::new()),
        Arc::new(RecordingObserver::default()),
        default_settings(),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["backend"], "stub");
}

#[actix_web::test]
async fn test_not_ready_when_backend_unavailable() {
    let app = create_test_app(
        Arc::new(StubFetcher::new().unavailable()),
        Arc::new(RecordingObserver::default()),
        default_settings(),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_READY");
    assert_eq!(body["message"], "stub backend offline");
}
