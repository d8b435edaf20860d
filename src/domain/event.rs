use serde::Serialize;

/// One persisted provider notification. Immutable after insert; the
/// internal surrogate key stays inside the store and is never exposed.
#[derive(Debug, Clone)]
pub struct PaymentEvent {
    pub event_id: String,
    pub payment_id: String,
    pub event_type: String,
    pub raw_payload: String,
    pub received_at: chrono::DateTime<chrono::Utc>,
}

/// Insert input: everything but the server-assigned timestamp.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub event_id: String,
    pub payment_id: String,
    pub event_type: String,
    pub raw_payload: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Success,
    Duplicate,
    Failed,
}

/// Per-event result reported back to the provider. `event_id` is null
/// when the event was too malformed to carry one.
#[derive(Debug, Clone, Serialize)]
pub struct EventOutcome {
    pub event_id: Option<String>,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A batch of one collapses to the bare outcome object; callers posting
/// single events depend on not getting an array back.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum IngestResponse {
    Single(EventOutcome),
    Batch(Vec<EventOutcome>),
}
