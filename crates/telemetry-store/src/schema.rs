//! Telemetry store database schema.

use sqlx::migrate::Migrator;

/// Embedded migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");
