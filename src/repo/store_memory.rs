use crate::domain::event::{NewEvent, PaymentEvent};
use crate::repo::event_store::{EventStore, InsertOutcome};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory store with the same contract as Postgres: unique
/// `event_id`, server-assigned non-decreasing `received_at`. Used by
/// the integration tests in place of a live database.
#[derive(Clone, Default)]
pub struct MemoryEventStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<PaymentEvent>,
    last_received_at: Option<DateTime<Utc>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl EventStore for MemoryEventStore {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, event: NewEvent) -> Result<InsertOutcome> {
        let mut inner = self.inner.lock().await;
        if inner.rows.iter().any(|row| row.event_id == event.event_id) {
            return Ok(InsertOutcome::DuplicateEventId);
        }

        // Clamp against the previous timestamp so iteration order stays
        // stable even when the clock reads the same instant twice.
        let mut received_at = Utc::now();
        if let Some(last) = inner.last_received_at {
            if received_at < last {
                received_at = last;
            }
        }
        inner.last_received_at = Some(received_at);

        inner.rows.push(PaymentEvent {
            event_id: event.event_id,
            payment_id: event.payment_id,
            event_type: event.event_type,
            raw_payload: event.raw_payload,
            received_at,
        });
        Ok(InsertOutcome::Inserted)
    }

    async fn list_by_payment(&self, payment_id: &str) -> Result<Vec<PaymentEvent>> {
        let inner = self.inner.lock().await;
        let mut events: Vec<PaymentEvent> = inner
            .rows
            .iter()
            .filter(|row| row.payment_id == payment_id)
            .cloned()
            .collect();
        events.sort_by_key(|row| row.received_at);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryEventStore;
    use crate::domain::event::NewEvent;
    use crate::repo::event_store::{EventStore, InsertOutcome};

    fn event(event_id: &str, payment_id: &str) -> NewEvent {
        NewEvent {
            event_id: event_id.to_string(),
            payment_id: payment_id.to_string(),
            event_type: "payment.authorized".to_string(),
            raw_payload: "{}".to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_event_id_is_reported_once() {
        let store = MemoryEventStore::new();
        assert_eq!(
            store.insert(event("evt_1", "pay_1")).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert_eq!(
            store.insert(event("evt_1", "pay_1")).await.unwrap(),
            InsertOutcome::DuplicateEventId
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn received_at_is_non_decreasing() {
        let store = MemoryEventStore::new();
        for i in 0..20 {
            store
                .insert(event(&format!("evt_{i}"), "pay_1"))
                .await
                .unwrap();
        }
        let events = store.list_by_payment("pay_1").await.unwrap();
        assert_eq!(events.len(), 20);
        for pair in events.windows(2) {
            assert!(pair[0].received_at <= pair[1].received_at);
        }
    }

    #[tokio::test]
    async fn unknown_payment_is_empty() {
        let store = MemoryEventStore::new();
        store.insert(event("evt_1", "pay_1")).await.unwrap();
        assert!(store.list_by_payment("pay_404").await.unwrap().is_empty());
    }
}
