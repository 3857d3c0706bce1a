//! Route for submitting telemetry events.

use axum::body::Body;
use axum::extract::State;
use axum::http::Method;
use axum::{Router, routing::post};
use telemetry_core::error::IngestError;
use tracing::{error, info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned once an event is stored.
pub const SAVED_MESSAGE: &str = "Telemetry data received and saved successfully";

/// POST /capture-event
#[instrument(skip_all)]
async fn capture_event(
    State(state): State<AppState>,
    body: Body,
) -> Result<&'static str, ApiError> {
    let payload = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .inspect_err(|e| error!(error = %e, "failed to read request body"))
        .map_err(|e| ApiError::BodyRead(e.to_string()))?;

    let event = state
        .validator
        .validate(&payload)
        .inspect_err(|e| match e {
            IngestError::Validation(errors) => {
                warn!(error_count = errors.len(), %errors, "rejected telemetry event");
            }
            other => warn!(error = %other, "rejected telemetry payload"),
        })?;

    info!(
        event_type = %event.event_type(),
        uuid = %event.uuid(),
        "received telemetry event"
    );

    state
        .writer
        .write(&event)
        .await
        .inspect_err(|e| error!(error = %e, uuid = %event.uuid(), "failed to save telemetry data"))?;

    Ok(SAVED_MESSAGE)
}

/// Any method other than POST on /capture-event.
async fn method_not_allowed(method: Method) -> ApiError {
    warn!(%method, "method not allowed on capture route");
    ApiError::MethodNotAllowed
}

/// Returns the router for event capture.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/capture-event",
        post(capture_event).fallback(method_not_allowed),
    )
}
