//! Payload fixtures — valid request bodies for every event type.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use telemetry_core::event::{EventType, TelemetryEvent};
use telemetry_core::schema::EventSchema;
use telemetry_core::validator::EventValidator;
use uuid::Uuid;

/// Fixed creation timestamp used by fixture payloads.
const FIXTURE_CREATED_AT: &str = "2026-01-15T10:00:00Z";

/// Builds a `data` map holding exactly the required keys for `event_type`.
/// Constrained keys get the first allowed choice.
///
/// # Panics
///
/// Panics if the standard schema has no rule for `event_type`.
#[must_use]
pub fn minimal_data(event_type: EventType) -> Map<String, Value> {
    let schema = EventSchema::standard();
    let rule = schema.rule(event_type).expect("standard schema covers every event type");

    rule.required
        .iter()
        .map(|key| {
            let value = match rule.choice {
                Some(choice) if choice.key == *key => json!(choice.allowed[0]),
                _ => json!(format!("{key}-1")),
            };
            ((*key).to_owned(), value)
        })
        .collect()
}

/// A complete, valid request body for `event_type` with the given `uuid`.
#[must_use]
pub fn valid_payload(event_type: EventType, uuid: Uuid) -> Value {
    json!({
        "eventType": event_type.as_str(),
        "uuid": uuid,
        "createdAt": FIXTURE_CREATED_AT,
        "data": minimal_data(event_type),
    })
}

/// A validated event built from [`valid_payload`].
///
/// # Panics
///
/// Panics if the fixture payload fails validation.
#[must_use]
pub fn valid_event(event_type: EventType, uuid: Uuid) -> TelemetryEvent {
    let validator = EventValidator::new(Arc::new(EventSchema::standard()));
    let body = serde_json::to_vec(&valid_payload(event_type, uuid)).expect("fixture serializes");
    validator.validate(&body).expect("fixture payload is valid")
}
