//! Telemetry Store — `PostgreSQL` persistence for validated telemetry events.

pub mod pg_telemetry_writer;
pub mod schema;

pub use pg_telemetry_writer::{PgTelemetryWriter, TelemetryRow};
pub use schema::MIGRATOR;
