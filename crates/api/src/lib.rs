//! # ClinicSlots API
//!
//! The API crate serves the slot preview service: stateless HTTP endpoints
//! over the pure scheduling core, used by calendars that need to show what a
//! clinician's availability rules will produce without a booking-system
//! round-trip.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Decode requests and call into `clinicslots-core`
//! - **Middleware**: Error-to-response mapping
//! - **Config**: Handle environment and application configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers wrapping the scheduling core
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Longest inclusive date range `POST /api/slots/expand` accepts
    pub max_range_days: i64,
}

impl ApiState {
    pub fn from_config(config: &config::ApiConfig) -> Self {
        Self {
            max_range_days: config.max_range_days,
        }
    }
}

/// Builds the application router with all routes and shared state attached
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot preview, count and expansion
        .merge(routes::slots::routes())
        // Month, week and day-grid view models
        .merge(routes::calendar::routes())
        // Weekly schedule validation and rule building
        .merge(routes::schedule::routes())
        // 12/24-hour conversion
        .merge(routes::time::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins))
}

/// Starts the API server with the provided configuration
///
/// This function initializes logging, configures routes and middleware,
/// and serves until the process is stopped.
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_config(&config));
    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Slot preview server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
