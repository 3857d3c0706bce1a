//! Per-event-type rule table.
//!
//! The table is pure data: adding an event type or a constrained key means
//! adding an entry here, not touching the validator.

use std::collections::HashMap;

use crate::event::EventType;

/// Accepted answers to a visit confirmation request.
pub const CONFIRMATION_RESPONSES: &[&str] =
    &["confirm", "not available for rent", "reschedule", "cancel visit"];

/// Accepted net promoter score buckets.
pub const NPS_SCORES: &[&str] = &["average", "excellent", "poor"];

/// Restricts one `data` key to a fixed set of string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceConstraint {
    /// The constrained key inside `data`.
    pub key: &'static str,
    /// Accepted values, compared ignoring ASCII case.
    pub allowed: &'static [&'static str],
}

impl ChoiceConstraint {
    /// Returns true if `value` matches one of the allowed choices.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.allowed
            .iter()
            .any(|choice| choice.eq_ignore_ascii_case(value))
    }
}

/// The rules a single event type's `data` must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRule {
    /// Keys that must be present in `data`.
    pub required: &'static [&'static str],
    /// Optional value constraint on one of the keys.
    pub choice: Option<ChoiceConstraint>,
}

/// Immutable lookup from event type to its rule, built once at startup.
#[derive(Debug, Clone)]
pub struct EventSchema {
    rules: HashMap<EventType, EventRule>,
}

impl EventSchema {
    /// The production rule set covering every known event type.
    #[must_use]
    pub fn standard() -> Self {
        let confirmation = Some(ChoiceConstraint {
            key: "confirmationResponse",
            allowed: CONFIRMATION_RESPONSES,
        });
        let score = Some(ChoiceConstraint {
            key: "score",
            allowed: NPS_SCORES,
        });

        let rules = HashMap::from([
            (
                EventType::OwnerOutreach,
                EventRule {
                    required: &["leadId", "responseText"],
                    choice: None,
                },
            ),
            (
                EventType::OwnerProfileReviewed,
                EventRule {
                    required: &["proposalId", "reviewResponse"],
                    choice: None,
                },
            ),
            (
                EventType::OwnerListingApproval,
                EventRule {
                    required: &["propertyId", "approvalResponse"],
                    choice: None,
                },
            ),
            (
                EventType::OwnerPropertyAvailabilityCheck,
                EventRule {
                    required: &["propertyId", "isAvailable"],
                    choice: None,
                },
            ),
            (
                EventType::OwnerVisitConfirmation,
                EventRule {
                    required: &["visitId", "confirmationResponse"],
                    choice: confirmation,
                },
            ),
            (
                EventType::TenantVisitConfirmation,
                EventRule {
                    required: &["visitId", "confirmationResponse"],
                    choice: confirmation,
                },
            ),
            (
                EventType::VisitNps,
                EventRule {
                    required: &["visitId", "score"],
                    choice: score,
                },
            ),
            (
                EventType::TransactionNps,
                EventRule {
                    required: &["dealId", "score"],
                    choice: score,
                },
            ),
        ]);

        Self { rules }
    }

    /// Looks up the rule for `event_type`.
    #[must_use]
    pub fn rule(&self, event_type: EventType) -> Option<&EventRule> {
        self.rules.get(&event_type)
    }
}
