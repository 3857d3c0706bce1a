//! Telemetry writer abstraction.

use async_trait::async_trait;

use crate::error::IngestError;
use crate::event::TelemetryEvent;

/// Persists validated telemetry events, one row per call.
///
/// Implementations must be safe to share across concurrent requests. They
/// do not retry; a failed write is reported to the caller.
#[async_trait]
pub trait TelemetryWriter: Send + Sync {
    /// Writes a single event.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Serialization` if the event data cannot be
    /// encoded, or `IngestError::StoreWrite` if the store rejects the insert.
    async fn write(&self, event: &TelemetryEvent) -> Result<(), IngestError>;
}
