//! Telemetry API — HTTP front end for the capture pipeline.

pub mod config;
pub mod error;
pub mod observability;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the client origins once they are fixed.
    Router::new()
        .merge(routes::home::router())
        .merge(routes::health::router())
        .merge(routes::capture::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
