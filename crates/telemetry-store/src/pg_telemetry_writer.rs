//! `PostgreSQL` implementation of the `TelemetryWriter` trait.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use telemetry_core::error::IngestError;
use telemetry_core::event::TelemetryEvent;
use telemetry_core::writer::TelemetryWriter;

const INSERT_EVENT: &str = r"
INSERT INTO telemetry_data (event_type, created_at, uuid, data)
VALUES ($1, $2, $3, $4::jsonb)
";

const SELECT_BY_UUID: &str = r"
SELECT event_type, created_at, uuid, data
FROM telemetry_data
WHERE uuid = $1
ORDER BY created_at
";

/// A persisted telemetry row as read back from the store.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TelemetryRow {
    /// Wire name of the event type.
    pub event_type: String,
    /// Creation time normalized to UTC.
    pub created_at: NaiveDateTime,
    /// Hyphenated lowercase event identifier.
    pub uuid: String,
    /// The event's `data` object.
    pub data: Value,
}

/// PostgreSQL-backed telemetry writer.
///
/// Holds a clone of the pool; connection acquire and release are left to
/// the pool.
#[derive(Debug, Clone)]
pub struct PgTelemetryWriter {
    pool: PgPool,
}

impl PgTelemetryWriter {
    /// Creates a new `PgTelemetryWriter`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads every row stored under `uuid`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::StoreWrite` if the query fails.
    pub async fn load_by_uuid(&self, uuid: Uuid) -> Result<Vec<TelemetryRow>, IngestError> {
        sqlx::query_as::<_, TelemetryRow>(SELECT_BY_UUID)
            .bind(uuid.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| IngestError::StoreWrite(e.to_string()))
    }
}

#[async_trait]
impl TelemetryWriter for PgTelemetryWriter {
    async fn write(&self, event: &TelemetryEvent) -> Result<(), IngestError> {
        let data = serde_json::to_string(event.data())
            .map_err(|e| IngestError::Serialization(format!("failed to serialize data: {e}")))?;

        sqlx::query(INSERT_EVENT)
            .bind(event.event_type().as_str())
            .bind(event.created_at().naive_utc())
            .bind(event.uuid().to_string())
            .bind(data)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                IngestError::StoreWrite(format!("failed to insert telemetry data: {e}"))
            })?;

        debug!(uuid = %event.uuid(), event_type = %event.event_type(), "telemetry row inserted");

        Ok(())
    }
}
