use crate::domain::event::{NewEvent, PaymentEvent};
use crate::repo::event_store::{EventStore, InsertOutcome};
use anyhow::Result;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PgEventStore {
    pub pool: PgPool,
}

#[async_trait::async_trait]
impl EventStore for PgEventStore {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS payment_events (
                id BIGSERIAL PRIMARY KEY,
                event_id TEXT NOT NULL,
                payment_id TEXT NOT NULL,
                event_type TEXT NOT NULL,
                raw_payload TEXT NOT NULL,
                received_at TIMESTAMPTZ NOT NULL,
                CONSTRAINT unique_event_id UNIQUE (event_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_payment_events_payment_id
             ON payment_events (payment_id, received_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert(&self, event: NewEvent) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO payment_events (event_id, payment_id, event_type, raw_payload, received_at)
            VALUES ($1, $2, $3, $4, now())
            "#,
        )
        .bind(&event.event_id)
        .bind(&event.payment_id)
        .bind(&event.event_type)
        .bind(&event.raw_payload)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Ok(InsertOutcome::DuplicateEventId)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_by_payment(&self, payment_id: &str) -> Result<Vec<PaymentEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT event_id, payment_id, event_type, raw_payload, received_at
            FROM payment_events
            WHERE payment_id = $1
            ORDER BY received_at ASC, id ASC
            "#,
        )
        .bind(payment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PaymentEvent {
                event_id: row.get("event_id"),
                payment_id: row.get("payment_id"),
                event_type: row.get("event_type"),
                raw_payload: row.get("raw_payload"),
                received_at: row.get("received_at"),
            })
            .collect())
    }
}
