//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "File Bridge Server",
        version = "0.1.0",
        description = "Streams files from a storage backend as HTTP downloads"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        api::health::health,
        api::health::ready,
        api::files::download,
    ),
    components(
        schemas(
            api::health::HealthResponse,
            api::health::ReadyResponse,
            api::health::NotReadyResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Files", description = "Bridged file downloads")
    )
)]
pub struct ApiDoc;
