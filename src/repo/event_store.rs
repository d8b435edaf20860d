use crate::domain::event::{NewEvent, PaymentEvent};
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The unique constraint on `event_id` fired; the pipeline treats
    /// this as a noted success, not a failure.
    DuplicateEventId,
}

#[async_trait::async_trait]
pub trait EventStore: Send + Sync {
    /// Creates the backing table if absent. Idempotent.
    async fn ensure_schema(&self) -> Result<()>;

    /// Atomically persists one event, assigning `received_at`. A second
    /// insert with the same `event_id` yields `DuplicateEventId` and
    /// leaves the stored row untouched; any other failure is `Err`.
    async fn insert(&self, event: NewEvent) -> Result<InsertOutcome>;

    /// All events for one payment, ascending by `received_at`. Empty
    /// vec when the payment is unknown.
    async fn list_by_payment(&self, payment_id: &str) -> Result<Vec<PaymentEvent>>;
}
