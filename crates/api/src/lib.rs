//! # Fieldbook API
//!
//! The API crate provides the web server for the Fieldbook booking inventory
//! service: fields, time slots and the per-day field schedules customers
//! book against.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Decode requests and call the core services
//! - **Middleware**: Error to HTTP mapping
//! - **Config**: Environment configuration
//! - **Uploads**: Local-disk storage for field images
//!
//! Handlers only see [`fieldbook_core::services::Services`], so the same
//! router runs over PostgreSQL in production and over the in-memory store in
//! tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Local object storage for uploaded images
pub mod uploads;

use std::{path::Path, sync::Arc, time::Duration};

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{Method, StatusCode, header},
};
use eyre::Result;
use fieldbook_core::services::Services;
use fieldbook_db::{DbPool, PgFieldRepository, PgFieldScheduleRepository, PgTimeSlotRepository};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::uploads::LocalObjectStorage;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub services: Services,
}

/// Builds the full router: versioned API, health endpoints and the
/// `/uploads` file server rooted at `upload_dir`.
pub fn build_router(state: Arc<ApiState>, upload_dir: &Path) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Fields, time slots and schedules
        .nest(routes::API_PREFIX, routes::api_routes())
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

async fn handle_timeout_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
    }
}

/// Installs the global `tracing` subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server with the provided configuration and database connection
///
/// Wires the PostgreSQL repositories and the local image storage into the
/// services, then serves until the listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = fieldbook_api::config::ApiConfig::from_env()?;
/// let pool = fieldbook_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// fieldbook_api::start_server(config, pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    let storage = LocalObjectStorage::new(&config.upload_dir, &config.upload_base_url);
    tokio::fs::create_dir_all(storage.root()).await?;

    let services = Services::new(
        Arc::new(PgFieldRepository::new(db_pool.clone())),
        Arc::new(PgTimeSlotRepository::new(db_pool.clone())),
        Arc::new(PgFieldScheduleRepository::new(db_pool)),
        Arc::new(storage),
        config.schedule_timezone,
    );
    let state = Arc::new(ApiState { services });

    let app = build_router(state, &config.upload_dir);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (schedule timezone {})",
        addr, config.schedule_timezone
    );
    axum::serve(listener, app).await?;

    Ok(())
}
