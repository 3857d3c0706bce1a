//! Structural validation of raw event payloads.
//!
//! The validator checks every top-level field and every rule for the event
//! type before deciding, so a rejected payload reports all of its problems
//! at once.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{IngestError, ValidationError, ValidationErrorKind, ValidationErrors};
use crate::event::{EventType, TelemetryEvent};
use crate::schema::EventSchema;

const EVENT_TYPE: &str = "eventType";
const UUID: &str = "uuid";
const CREATED_AT: &str = "createdAt";
const DATA: &str = "data";

/// Length of the hyphenated 8-4-4-4-12 form. Hex digits must be lowercase
/// so the stored text matches what the client sent.
const HYPHENATED_UUID_LEN: usize = 36;

/// Turns raw request bodies into validated [`TelemetryEvent`]s.
#[derive(Debug, Clone)]
pub struct EventValidator {
    schema: Arc<EventSchema>,
}

impl EventValidator {
    /// Creates a validator over `schema`.
    #[must_use]
    pub fn new(schema: Arc<EventSchema>) -> Self {
        Self { schema }
    }

    /// Parses and validates one payload.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::MalformedJson` if `payload` is not JSON, and
    /// `IngestError::Validation` carrying every field-level failure if it is
    /// JSON but does not match the schema.
    pub fn validate(&self, payload: &[u8]) -> Result<TelemetryEvent, IngestError> {
        let value: Value = serde_json::from_slice(payload)
            .map_err(|e| IngestError::MalformedJson(e.to_string()))?;

        let Value::Object(mut object) = value else {
            return Err(rejected(vec![ValidationError::new(
                "$",
                ValidationErrorKind::WrongType {
                    expected: "a JSON object",
                },
            )]));
        };

        let mut errors = Vec::new();
        let event_type = check_event_type(object.get(EVENT_TYPE), &mut errors);
        let uuid = check_uuid(object.get(UUID), &mut errors);
        let created_at = check_created_at(object.get(CREATED_AT), &mut errors);
        let data = check_data(object.remove(DATA), &mut errors);

        if let Some(event_type) = event_type {
            let empty = Map::new();
            self.check_rule(event_type, data.as_ref().unwrap_or(&empty), &mut errors);
        }

        match (event_type, uuid, created_at, data) {
            (Some(event_type), Some(uuid), Some(created_at), Some(data)) if errors.is_empty() => {
                Ok(TelemetryEvent::new(event_type, uuid, created_at, data))
            }
            _ => Err(rejected(errors)),
        }
    }

    fn check_rule(
        &self,
        event_type: EventType,
        data: &Map<String, Value>,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(rule) = self.schema.rule(event_type) else {
            errors.push(ValidationError::new(
                EVENT_TYPE,
                ValidationErrorKind::InvalidEventType,
            ));
            return;
        };

        for key in rule.required {
            if !data.contains_key(*key) {
                errors.push(ValidationError::new(
                    format!("{DATA}.{key}"),
                    ValidationErrorKind::MissingDataKey,
                ));
            }
        }

        if let Some(choice) = rule.choice {
            if let Some(value) = data.get(choice.key) {
                let accepted = value.as_str().is_some_and(|s| choice.accepts(s));
                if !accepted {
                    errors.push(ValidationError::new(
                        format!("{DATA}.{}", choice.key),
                        ValidationErrorKind::InvalidChoice {
                            allowed: choice.allowed,
                        },
                    ));
                }
            }
        }
    }
}

fn rejected(errors: Vec<ValidationError>) -> IngestError {
    IngestError::Validation(ValidationErrors::collected(errors))
}

/// Returns the string value of a required field, recording an error if it is
/// absent or not a string.
fn required_str<'a>(
    field: &'static str,
    value: Option<&'a Value>,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a str> {
    match value {
        None | Some(Value::Null) => {
            errors.push(ValidationError::new(field, ValidationErrorKind::Missing));
            None
        }
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            errors.push(ValidationError::new(
                field,
                ValidationErrorKind::WrongType {
                    expected: "a string",
                },
            ));
            None
        }
    }
}

fn check_event_type(value: Option<&Value>, errors: &mut Vec<ValidationError>) -> Option<EventType> {
    let raw = required_str(EVENT_TYPE, value, errors)?;
    if let Ok(event_type) = raw.parse() {
        Some(event_type)
    } else {
        errors.push(ValidationError::new(
            EVENT_TYPE,
            ValidationErrorKind::InvalidEventType,
        ));
        None
    }
}

fn check_uuid(value: Option<&Value>, errors: &mut Vec<ValidationError>) -> Option<Uuid> {
    let raw = required_str(UUID, value, errors)?;
    let lowercase = !raw.bytes().any(|b| b.is_ascii_uppercase());
    let parsed = if raw.len() == HYPHENATED_UUID_LEN && lowercase {
        Uuid::try_parse(raw).ok()
    } else {
        None
    };
    if parsed.is_none() {
        errors.push(ValidationError::new(UUID, ValidationErrorKind::InvalidUuid));
    }
    parsed
}

fn check_created_at(
    value: Option<&Value>,
    errors: &mut Vec<ValidationError>,
) -> Option<DateTime<FixedOffset>> {
    let raw = required_str(CREATED_AT, value, errors)?;
    if let Ok(created_at) = DateTime::parse_from_rfc3339(raw) {
        Some(created_at)
    } else {
        errors.push(ValidationError::new(
            CREATED_AT,
            ValidationErrorKind::InvalidTimestamp,
        ));
        None
    }
}

fn check_data(
    value: Option<Value>,
    errors: &mut Vec<ValidationError>,
) -> Option<Map<String, Value>> {
    match value {
        None | Some(Value::Null) => {
            errors.push(ValidationError::new(DATA, ValidationErrorKind::Missing));
            None
        }
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            errors.push(ValidationError::new(
                DATA,
                ValidationErrorKind::WrongType {
                    expected: "an object",
                },
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const EVENT_UUID: &str = "0b9f6c3e-4d1a-4c6b-9f7e-2a3b4c5d6e7f";
    const CREATED: &str = "2026-01-15T10:00:00Z";

    fn validator() -> EventValidator {
        EventValidator::new(Arc::new(EventSchema::standard()))
    }

    /// A `data` map containing exactly the required keys, with values that
    /// satisfy any choice constraint.
    fn minimal_data(event_type: EventType) -> Value {
        let schema = EventSchema::standard();
        let rule = schema.rule(event_type).unwrap();
        let mut data = Map::new();
        for key in rule.required {
            let value = match rule.choice {
                Some(choice) if choice.key == *key => json!(choice.allowed[0]),
                _ => json!("value"),
            };
            data.insert((*key).to_owned(), value);
        }
        Value::Object(data)
    }

    fn payload(event_type: &str, data: &Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "eventType": event_type,
            "uuid": EVENT_UUID,
            "createdAt": CREATED,
            "data": data,
        }))
        .unwrap()
    }

    fn validation_errors(result: Result<TelemetryEvent, IngestError>) -> ValidationErrors {
        match result {
            Err(IngestError::Validation(errors)) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_every_event_type_accepts_exactly_its_required_keys() {
        let validator = validator();

        for event_type in EventType::ALL {
            // Arrange
            let body = payload(event_type.as_str(), &minimal_data(event_type));

            // Act
            let event = validator.validate(&body).unwrap();

            // Assert
            assert_eq!(event.event_type(), event_type);
            assert_eq!(event.uuid().to_string(), EVENT_UUID);
            assert_eq!(event.created_at().to_rfc3339(), "2026-01-15T10:00:00+00:00");
        }
    }

    #[test]
    fn test_omitting_any_required_key_names_that_key() {
        let validator = validator();
        let schema = EventSchema::standard();

        for event_type in EventType::ALL {
            for key in schema.rule(event_type).unwrap().required {
                // Arrange
                let mut data = minimal_data(event_type);
                data.as_object_mut().unwrap().remove(*key);
                let body = payload(event_type.as_str(), &data);

                // Act
                let errors = validation_errors(validator.validate(&body));

                // Assert
                let field = format!("data.{key}");
                assert_eq!(errors.len(), 1, "{event_type} without {key}");
                assert_eq!(errors.errors()[0].field, field);
                assert_eq!(errors.errors()[0].kind, ValidationErrorKind::MissingDataKey);
            }
        }
    }

    #[test]
    fn test_extra_data_keys_are_kept() {
        // Arrange
        let mut data = minimal_data(EventType::OwnerOutreach);
        data["channel"] = json!("whatsapp");
        let body = payload("OwnerOutreach", &data);

        // Act
        let event = validator().validate(&body).unwrap();

        // Assert
        assert_eq!(event.data().get("channel"), Some(&json!("whatsapp")));
    }

    #[test]
    fn test_unknown_event_type_is_rejected_regardless_of_data() {
        let validator = validator();
        let candidates = [
            json!({}),
            minimal_data(EventType::VisitNps),
            json!({ "leadId": 1, "responseText": "yes" }),
        ];

        for data in candidates {
            let errors = validation_errors(validator.validate(&payload("OwnerSignup", &data)));

            assert_eq!(errors.len(), 1);
            assert_eq!(errors.errors()[0].field, "eventType");
            assert_eq!(errors.errors()[0].kind, ValidationErrorKind::InvalidEventType);
            assert!(errors.to_string().contains("invalid event type"));
        }
    }

    #[test]
    fn test_choice_values_match_ignoring_case() {
        let validator = validator();

        for response in ["confirm", "CONFIRM", "Reschedule", "cancel VISIT"] {
            let data = json!({ "visitId": "v-1", "confirmationResponse": response });
            let result = validator.validate(&payload("OwnerVisitConfirmation", &data));
            assert!(result.is_ok(), "{response}");
        }

        for score in ["poor", "EXCELLENT", "Average"] {
            let data = json!({ "dealId": "d-1", "score": score });
            let result = validator.validate(&payload("TransactionNPS", &data));
            assert!(result.is_ok(), "{score}");
        }
    }

    #[test]
    fn test_choice_rejects_unknown_and_non_string_values() {
        let validator = validator();

        for score in [json!("great"), json!(9), json!(null)] {
            // Arrange
            let data = json!({ "visitId": "v-1", "score": score });

            // Act
            let errors = validation_errors(validator.validate(&payload("VisitNPS", &data)));

            // Assert
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.errors()[0].field, "data.score");
            assert!(matches!(
                errors.errors()[0].kind,
                ValidationErrorKind::InvalidChoice { .. }
            ));
        }
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = validator().validate(b"{\"eventType\": ");

        assert!(matches!(result, Err(IngestError::MalformedJson(_))));
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        let errors = validation_errors(validator().validate(b"[1, 2, 3]"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "$");
    }

    #[test]
    fn test_all_top_level_errors_are_reported_together() {
        // Arrange
        let body = serde_json::to_vec(&json!({
            "eventType": "Nope",
            "uuid": "not-a-uuid",
            "createdAt": "15/01/2026",
            "data": [],
        }))
        .unwrap();

        // Act
        let errors = validation_errors(validator().validate(&body));

        // Assert
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["eventType", "uuid", "createdAt", "data"]);
    }

    #[test]
    fn test_missing_top_level_fields_are_reported() {
        let errors = validation_errors(validator().validate(b"{}"));

        assert_eq!(errors.len(), 4);
        assert!(
            errors
                .errors()
                .iter()
                .all(|e| e.kind == ValidationErrorKind::Missing)
        );
    }

    #[test]
    fn test_data_key_errors_are_collected_with_top_level_errors() {
        // Arrange
        let body = serde_json::to_vec(&json!({
            "eventType": "TenantVisitConfirmation",
            "uuid": EVENT_UUID,
            "createdAt": "yesterday",
            "data": { "confirmationResponse": "maybe" },
        }))
        .unwrap();

        // Act
        let errors = validation_errors(validator().validate(&body));

        // Assert
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["createdAt", "data.visitId", "data.confirmationResponse"]
        );
    }

    #[test]
    fn test_uuid_must_be_hyphenated() {
        let validator = validator();

        for uuid in [
            "0b9f6c3e4d1a4c6b9f7e2a3b4c5d6e7f",
            "{0b9f6c3e-4d1a-4c6b-9f7e-2a3b4c5d6e7f}",
            "0b9f6c3e-4d1a-4c6b-9f7e-2a3b4c5d6e7",
            "0B9F6C3E-4D1A-4C6B-9F7E-2A3B4C5D6E7F",
            "0b9f6c3e-4d1a-4C6B-9f7e-2a3b4c5d6e7f",
        ] {
            let body = serde_json::to_vec(&json!({
                "eventType": "VisitNPS",
                "uuid": uuid,
                "createdAt": CREATED,
                "data": minimal_data(EventType::VisitNps),
            }))
            .unwrap();

            let errors = validation_errors(validator.validate(&body));

            assert_eq!(errors.errors()[0].kind, ValidationErrorKind::InvalidUuid, "{uuid}");
        }
    }

    #[test]
    fn test_accepted_uuid_renders_as_submitted() {
        let body = payload("OwnerOutreach", &minimal_data(EventType::OwnerOutreach));

        let event = validator().validate(&body).unwrap();

        assert_eq!(event.uuid().to_string(), EVENT_UUID);
    }

    #[test]
    fn test_missing_data_reports_required_keys() {
        let validator = validator();

        for data in [None, Some(json!(null)), Some(json!("visit"))] {
            // Arrange
            let mut body = json!({
                "eventType": "VisitNPS",
                "uuid": EVENT_UUID,
                "createdAt": CREATED,
            });
            if let Some(data) = data {
                body["data"] = data;
            }

            // Act
            let errors = validation_errors(validator.validate(&serde_json::to_vec(&body).unwrap()));

            // Assert
            let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, ["data", "data.visitId", "data.score"]);
        }
    }

    #[test]
    fn test_created_at_keeps_its_offset() {
        let body = serde_json::to_vec(&json!({
            "eventType": "OwnerOutreach",
            "uuid": EVENT_UUID,
            "createdAt": "2026-01-15T15:30:00.250+05:30",
            "data": minimal_data(EventType::OwnerOutreach),
        }))
        .unwrap();

        let event = validator().validate(&body).unwrap();

        assert_eq!(event.created_at().offset().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(event.created_at().timestamp_subsec_millis(), 250);
    }
}
