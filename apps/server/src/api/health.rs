//! Health check endpoints.

use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::Bridge;

/// Health check response.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Readiness check response.
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    status: &'static str,
    backend: &'static str,
}

/// Readiness failure response.
#[derive(Serialize, ToSchema)]
pub struct NotReadyResponse {
    error: &'static str,
    message: String,
}

/// Health check endpoint.
///
/// Returns 200 if the service is running.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check endpoint.
///
/// Returns 200 if the storage backend is reachable.
#[utoipa::path(
    get,
    path = "/api/v1/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Backend unavailable", body = NotReadyResponse)
    )
)]
#[get("/ready")]
pub async fn ready(bridge: web::Data<Bridge>) -> HttpResponse {
    let fetcher = bridge.fetcher();
    match fetcher.check().await {
        Ok(()) => HttpResponse::Ok().json(ReadyResponse {
            status: "ready",
            backend: fetcher.name(),
        }),
        Err(e) => HttpResponse::ServiceUnavailable().json(NotReadyResponse {
            error: "NOT_READY",
            message: e.to_string(),
        }),
    }
}

/// Configure health routes.
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
