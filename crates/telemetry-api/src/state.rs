//! Shared application state.

use std::sync::Arc;

use telemetry_core::validator::EventValidator;
use telemetry_core::writer::TelemetryWriter;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Validator over the rule table built at startup.
    pub validator: Arc<EventValidator>,
    /// Destination for validated events.
    pub writer: Arc<dyn TelemetryWriter>,
    /// Largest request body the capture route will read.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        validator: Arc<EventValidator>,
        writer: Arc<dyn TelemetryWriter>,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            validator,
            writer,
            max_body_bytes,
        }
    }
}
