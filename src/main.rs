use payments_webhooks::config::AppConfig;
use payments_webhooks::repo::event_store::EventStore;
use payments_webhooks::repo::store_pg::PgEventStore;
use payments_webhooks::service::ingest::IngestService;
use payments_webhooks::{app_router, AppState};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    let event_store: Arc<dyn EventStore> = Arc::new(PgEventStore { pool });
    event_store.ensure_schema().await?;

    let state = AppState {
        ingest: IngestService {
            store: event_store.clone(),
            webhook_secret: cfg.webhook_secret.clone(),
        },
        event_store,
    };

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
