//! Telemetry event types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// The closed set of event types a client may submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventType {
    /// An owner replied to a lead outreach.
    OwnerOutreach,
    /// An owner reviewed a proposal profile.
    OwnerProfileReviewed,
    /// An owner approved or rejected a listing.
    OwnerListingApproval,
    /// An owner confirmed whether a property is available.
    OwnerPropertyAvailabilityCheck,
    /// An owner responded to a visit request.
    OwnerVisitConfirmation,
    /// A tenant responded to a visit request.
    TenantVisitConfirmation,
    /// Net promoter score for a visit.
    #[serde(rename = "VisitNPS")]
    VisitNps,
    /// Net promoter score for a closed deal.
    #[serde(rename = "TransactionNPS")]
    TransactionNps,
}

impl EventType {
    /// Every known event type, in schema order.
    pub const ALL: [Self; 8] = [
        Self::OwnerOutreach,
        Self::OwnerProfileReviewed,
        Self::OwnerListingApproval,
        Self::OwnerPropertyAvailabilityCheck,
        Self::OwnerVisitConfirmation,
        Self::TenantVisitConfirmation,
        Self::VisitNps,
        Self::TransactionNps,
    ];

    /// The wire name of this event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OwnerOutreach => "OwnerOutreach",
            Self::OwnerProfileReviewed => "OwnerProfileReviewed",
            Self::OwnerListingApproval => "OwnerListingApproval",
            Self::OwnerPropertyAvailabilityCheck => "OwnerPropertyAvailabilityCheck",
            Self::OwnerVisitConfirmation => "OwnerVisitConfirmation",
            Self::TenantVisitConfirmation => "TenantVisitConfirmation",
            Self::VisitNps => "VisitNPS",
            Self::TransactionNps => "TransactionNPS",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known event type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_owned()))
    }
}

/// A validated telemetry event.
///
/// Only the validator constructs these, so holding one means the payload
/// satisfied the rule set for its event type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    event_type: EventType,
    uuid: Uuid,
    created_at: DateTime<FixedOffset>,
    data: Map<String, Value>,
}

impl TelemetryEvent {
    pub(crate) fn new(
        event_type: EventType,
        uuid: Uuid,
        created_at: DateTime<FixedOffset>,
        data: Map<String, Value>,
    ) -> Self {
        Self {
            event_type,
            uuid,
            created_at,
            data,
        }
    }

    /// The event type.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Client-supplied event identifier.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Client-supplied creation time, with its original offset.
    #[must_use]
    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    /// Event-specific payload.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}
