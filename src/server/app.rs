//! Axum application setup
//!
//! Creates and configures the Axum application with routes and middleware.

use crate::config::Settings;
use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,
    /// Outbound HTTP client; shared for connection pooling only, credentials
    /// and tokens stay request-scoped
    pub http: reqwest::Client,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

/// Build the outbound HTTP client from network settings
///
/// Timeouts apply per upstream request; a timed-out call surfaces as a
/// transport error at the handler boundary.
pub fn build_http_client(settings: &Settings) -> crate::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&settings.network.user_agent)
        .connect_timeout(Duration::from_secs(settings.network.connect_timeout))
        .timeout(Duration::from_secs(settings.network.request_timeout))
        .build()?;
    Ok(client)
}

/// Create the main Axum application with routes and middleware
pub fn create_app(settings: Settings) -> crate::Result<Router> {
    let http = build_http_client(&settings)?;

    let state = AppState {
        settings: Arc::new(settings),
        http,
        start_time: std::time::Instant::now(),
    };

    Ok(Router::new()
        .route(
            "/api/GetBeyondTrustData",
            get(super::handlers::get_beyondtrust_data),
        )
        .route(
            "/api/GetBeyondTrustJumpClientIPs",
            get(super::handlers::get_jump_client_ips),
        )
        .route("/ping", get(super::handlers::ping))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state))
}
