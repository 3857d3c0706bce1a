//! Telemetry API — error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use telemetry_core::error::IngestError;
use thiserror::Error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// The OTLP trace exporter could not be built.
    #[error("tracing exporter error: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),
}

/// Per-request failures of the capture endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The route only accepts POST.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// Validation or persistence failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_owned(),
            ),
            Self::BodyRead(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read request body".to_owned(),
            ),
            Self::Ingest(IngestError::MalformedJson(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid JSON format".to_owned())
            }
            Self::Ingest(IngestError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                format!("Validation failed\n{errors}"),
            ),
            Self::Ingest(IngestError::Serialization(_) | IngestError::StoreWrite(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save telemetry data".to_owned(),
            ),
        };

        (status, message).into_response()
    }
}
