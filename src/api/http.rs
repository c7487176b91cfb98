//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::rest::{history, scans, summary};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Scanning pages may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .route("/api/ping", get(summary::ping))
        .route("/api/scan", post(scans::record_scan))
        .route("/api/history", get(history::get_history))
        .route("/api/summary/dashboard", get(summary::get_dashboard))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
