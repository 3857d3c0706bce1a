//! Service banner at the root path.

use axum::{Router, routing::get};

use crate::state::AppState;

/// GET /
async fn home() -> &'static str {
    concat!("Telemetry capture service v", env!("CARGO_PKG_VERSION"))
}

/// Returns the root router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}
