//! Ingestion error types.

use std::fmt;

use thiserror::Error;

/// Top-level error for the validate-then-persist pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The payload is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    /// The payload is JSON but does not satisfy the event schema.
    #[error("validation failed:\n{0}")]
    Validation(ValidationErrors),

    /// The event data could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The store rejected or failed the insert.
    #[error("store write error: {0}")]
    StoreWrite(String),
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required top-level field is absent or null.
    Missing,
    /// The field is present but has the wrong JSON type.
    WrongType {
        /// The JSON type that was expected.
        expected: &'static str,
    },
    /// `eventType` is not one of the known event types.
    InvalidEventType,
    /// `uuid` is not a hyphenated RFC-4122 identifier.
    InvalidUuid,
    /// `createdAt` is not an RFC-3339 timestamp.
    InvalidTimestamp,
    /// A key required by the event type is absent from `data`.
    MissingDataKey,
    /// A constrained `data` value is not one of the allowed choices.
    InvalidChoice {
        /// Accepted values, compared ignoring ASCII case.
        allowed: &'static [&'static str],
    },
}

/// A field-attributed validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path of the offending field, e.g. `uuid` or `data.visitId`.
    pub field: String,
    /// What is wrong with it.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates a new validation error for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::Missing => write!(f, "{}: field is required", self.field),
            ValidationErrorKind::WrongType { expected } => {
                write!(f, "{}: expected {expected}", self.field)
            }
            ValidationErrorKind::InvalidEventType => {
                write!(f, "{}: invalid event type", self.field)
            }
            ValidationErrorKind::InvalidUuid => write!(f, "{}: invalid UUID", self.field),
            ValidationErrorKind::InvalidTimestamp => {
                write!(f, "{}: invalid RFC 3339 timestamp", self.field)
            }
            ValidationErrorKind::MissingDataKey => {
                write!(f, "{}: required key is missing", self.field)
            }
            ValidationErrorKind::InvalidChoice { allowed } => {
                write!(f, "{}: must be one of: {}", self.field, allowed.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every validation failure found in one payload, in detection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps errors the validator has already checked to be non-empty.
    pub(crate) fn collected(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    /// The individual errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an empty list is never constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}
