//! Telemetry Core — event schema, validation and persistence abstractions.
//!
//! This crate defines the closed set of event types, the per-type rule
//! table, the payload validator and the writer trait that storage backends
//! implement. It contains no infrastructure code.

pub mod error;
pub mod event;
pub mod schema;
pub mod validator;
pub mod writer;
