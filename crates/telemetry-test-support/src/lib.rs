//! Shared test doubles and fixtures for the telemetry capture service.

mod fixtures;
mod writer;

pub use fixtures::{minimal_data, valid_event, valid_payload};
pub use writer::{FailingTelemetryWriter, RecordingTelemetryWriter};
