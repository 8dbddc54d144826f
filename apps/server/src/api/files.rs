//! File download API handler.
//!
//! Bridges GET requests to the configured storage backend.

use actix_web::{HttpRequest, HttpResponse, Resource, web};

use crate::models::RequestDescriptor;
use crate::services::Bridge;

/// Stream a file from the storage backend.
///
/// Everything after the routing prefix is the backend path. `fileName` and
/// `contentType` set the matching response headers when present.
#[utoipa::path(
    get,
    path = "/sftp/{path}",
    tag = "Files",
    params(
        ("path" = String, Path, description = "Backend path of the file"),
        ("fileName" = Option<String>, Query, description = "Attachment filename for Content-Disposition"),
        ("contentType" = Option<String>, Query, description = "Value for the Content-Type header")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 404, description = "File does not exist", body = String, content_type = "text/plain"),
        (status = 500, description = "Routing or backend failure", body = String, content_type = "text/plain")
    )
)]
pub async fn download(req: HttpRequest, bridge: web::Data<Bridge>) -> HttpResponse {
    match RequestDescriptor::from_request(&req) {
        Ok(request) => bridge.handle(&request).await,
        Err(err) => bridge.reject(&req.uri().to_string(), err),
    }
}

/// Download resource for use as a scope's default service.
///
/// The routing prefix may appear anywhere in a path, so scopes that own a path segment
/// hand unmatched requests back to the bridge. Non-GET methods get 405.
pub fn fallback_service() -> Resource {
    web::resource("").route(web::get().to(download))
}

/// Configure file routes.
///
/// Matches every path so requests without the routing prefix reach the bridge and are
/// rejected there. Register after all other services.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{tail:.*}").route(web::get().to(download)));
}
