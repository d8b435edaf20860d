use crate::domain::event::{EventOutcome, EventStatus, IngestResponse, NewEvent};
use crate::normalize::normalize;
use crate::repo::event_store::{EventStore, InsertOutcome};
use crate::signature;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Request-fatal failures. Per-event problems (bad fields, duplicates)
/// never surface here; they become `EventOutcome` entries instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Invalid JSON format")]
    InvalidJson,
    #[error("Missing signature header")]
    MissingSignature,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Internal server error")]
    Storage(#[source] anyhow::Error),
}

#[derive(Clone)]
pub struct IngestService {
    pub store: Arc<dyn EventStore>,
    pub webhook_secret: String,
}

impl IngestService {
    /// Runs the full pipeline over one signed request: parse, check the
    /// signature against the untouched raw bytes, then normalize and
    /// persist each event of the batch independently and in order.
    pub async fn process(
        &self,
        raw_body: &[u8],
        signature_header: Option<&str>,
    ) -> Result<IngestResponse, IngestError> {
        let payload: Value =
            serde_json::from_slice(raw_body).map_err(|_| IngestError::InvalidJson)?;

        let provided = signature_header.ok_or(IngestError::MissingSignature)?;
        // One signature covers the whole body, batch or not.
        if !signature::verify(raw_body, provided, &self.webhook_secret) {
            return Err(IngestError::InvalidSignature);
        }

        let events = match payload {
            Value::Array(items) => items,
            single => vec![single],
        };

        let mut outcomes = Vec::with_capacity(events.len());
        for event in &events {
            outcomes.push(self.process_event(event).await?);
        }

        if outcomes.len() == 1 {
            Ok(IngestResponse::Single(outcomes.remove(0)))
        } else {
            Ok(IngestResponse::Batch(outcomes))
        }
    }

    async fn process_event(&self, event: &Value) -> Result<EventOutcome, IngestError> {
        // Best-effort id for correlating failures the normalizer rejects.
        let claimed_id = event
            .get("id")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        let normalized = match normalize(event) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(event_id = ?claimed_id, error = %e, "payload normalization failed");
                return Ok(EventOutcome {
                    event_id: claimed_id,
                    status: EventStatus::Failed,
                    error: Some(e.to_string()),
                });
            }
        };

        let outcome = self
            .store
            .insert(NewEvent {
                event_id: normalized.event_id.clone(),
                payment_id: normalized.payment_id.clone(),
                event_type: normalized.event_type,
                raw_payload: event.to_string(),
            })
            .await
            .map_err(IngestError::Storage)?;

        match outcome {
            InsertOutcome::Inserted => {
                tracing::info!(
                    event_id = %normalized.event_id,
                    payment_id = %normalized.payment_id,
                    "event persisted"
                );
                Ok(EventOutcome {
                    event_id: Some(normalized.event_id),
                    status: EventStatus::Success,
                    error: None,
                })
            }
            InsertOutcome::DuplicateEventId => {
                tracing::warn!(event_id = %normalized.event_id, "duplicate event ignored");
                Ok(EventOutcome {
                    event_id: Some(normalized.event_id),
                    status: EventStatus::Duplicate,
                    error: None,
                })
            }
        }
    }
}
