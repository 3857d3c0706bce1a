//! Test writers — in-memory `TelemetryWriter` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use telemetry_core::error::IngestError;
use telemetry_core::event::TelemetryEvent;
use telemetry_core::writer::TelemetryWriter;

/// A writer that records every event it is asked to persist and always
/// succeeds.
#[derive(Debug, Default)]
pub struct RecordingTelemetryWriter {
    written: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetryWriter {
    /// Create a new, empty recording writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all events written so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn written_events(&self) -> Vec<TelemetryEvent> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl TelemetryWriter for RecordingTelemetryWriter {
    async fn write(&self, event: &TelemetryEvent) -> Result<(), IngestError> {
        self.written.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A writer that always returns a store error and counts how often it was
/// called. Useful for testing error-handling paths.
#[derive(Debug, Default)]
pub struct FailingTelemetryWriter {
    attempts: Mutex<usize>,
}

impl FailingTelemetryWriter {
    /// Create a new failing writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write attempts received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl TelemetryWriter for FailingTelemetryWriter {
    async fn write(&self, _event: &TelemetryEvent) -> Result<(), IngestError> {
        *self.attempts.lock().unwrap() += 1;
        Err(IngestError::StoreWrite("connection refused".into()))
    }
}
