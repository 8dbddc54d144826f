//! File Bridge Server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_web::{App, HttpServer, web};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use file_bridge_lib::api::{self, ApiDoc};
use file_bridge_lib::config::Config;
use file_bridge_lib::middleware::RequestLogger;
use file_bridge_lib::services::{Bridge, fetcher};

/// Perform health check (for Docker healthcheck).
async fn health_check() -> bool {
    let Ok(config) = Config::from_env() else {
        return false;
    };
    match fetcher::from_config(&config) {
        Ok(backend) => backend.check().await.is_ok(),
        Err(_) => false,
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        if health_check().await {
            std::process::exit(0);
        } else {
            std::process::exit(1);
        }
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - BRIDGE_BACKEND selects 'local' (BRIDGE_LOCAL_ROOT) or 's3' (S3_*)");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  File Bridge Server");
    info!("  Environment: {}", config.environment);
    info!("  Backend: {}", config.backend);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let backend = match fetcher::from_config(&config) {
        Ok(backend) => backend,
        Err(e) => {
            error!("Failed to configure backend: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = backend.check().await {
        warn!("Backend is not ready yet: {}", e);
    }

    let bridge = Bridge::new(backend, config.bridge);
    info!(
        "Bridge limits: {}KB response buffer, {} chunks in flight per transfer",
        config.bridge.response_buffer_size / 1024,
        config.bridge.channel_capacity
    );

    let bind_address = config.bind_address();
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, config.workers
    );

    HttpServer::new(move || {
        App::new()
            // Add request logging middleware
            .wrap(RequestLogger)
            // Add shared state
            .app_data(web::Data::new(bridge.clone()))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .default_service(api::files::fallback_service()),
            )
            .service(
                SwaggerUi::new("/api/docs/{_:.*}").url("/api/openapi.json", ApiDoc::openapi()),
            )
            // Catch-all download route, must be registered last
            .configure(api::configure_file_routes)
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await
}
