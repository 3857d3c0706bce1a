//! Telemetry capture server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use telemetry_api::config::{self, Config};
use telemetry_api::error::AppError;
use telemetry_api::observability;
use telemetry_api::state::AppState;
use telemetry_core::schema::EventSchema;
use telemetry_core::validator::EventValidator;
use telemetry_store::{MIGRATOR, PgTelemetryWriter};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Environment first, so RUST_LOG from .env reaches the subscriber.
    let dotenv_path = config::load_dotenv();
    let config = Config::from_env()?;
    let tracing_guard = observability::init_tracing(config.otlp_endpoint.as_deref())?;

    match dotenv_path {
        Some(path) => tracing::info!(path = %path.display(), "loaded .env file"),
        None => tracing::info!("No .env file found, using system environment variables"),
    }
    tracing::info!("Starting telemetry capture server");

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    if config.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    // Build application state.
    let validator = Arc::new(EventValidator::new(Arc::new(EventSchema::standard())));
    let writer = Arc::new(PgTelemetryWriter::new(pool.clone()));
    let app_state = AppState::new(validator, writer, config.max_body_bytes);

    let app = telemetry_api::app(app_state);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received Ctrl+C, shutting down");
        })
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    tracing_guard.shutdown();

    Ok(())
}
