//! SVG to WebP conversion API service library.
//!
//! Exposes the conversion pipeline over HTTP: a JSON request carrying inline
//! SVG text goes in, WebP bytes come out.

pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Route path of the conversion endpoint.
pub const CONVERSION_ROUTE: &str = "/api/conversion/svg-to-webp";

/// Build the service router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(CONVERSION_ROUTE, post(handlers::convert_svg_to_webp_handler))
        // Health check
        .route("/health", get(handlers::health_handler))
        // Metrics
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
