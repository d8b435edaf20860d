use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

pub mod config;
pub mod domain {
    pub mod event;
}
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod payments;
        pub mod webhooks;
    }
}
pub mod normalize;
pub mod repo {
    pub mod event_store;
    pub mod store_memory;
    pub mod store_pg;
}
pub mod service {
    pub mod ingest;
}
pub mod signature;

#[derive(Clone)]
pub struct AppState {
    pub ingest: service::ingest::IngestService,
    pub event_store: Arc<dyn repo::event_store::EventStore>,
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook/payments", post(http::handlers::webhooks::receive))
        .route(
            "/payments/:payment_id/events",
            get(http::handlers::payments::list_payment_events),
        )
        .route("/health", get(http::handlers::ops::health))
        .fallback(http::handlers::ops::not_found)
        .layer(axum::middleware::map_response(
            http::handlers::ops::method_not_allowed_body,
        ))
        .with_state(state)
}
