use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// External projection of a stored event: type and receipt time only.
#[derive(Debug, Serialize)]
pub struct EventView {
    pub event_type: String,
    pub received_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_payment_events(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    match state.event_store.list_by_payment(&payment_id).await {
        Ok(events) => {
            let views: Vec<EventView> = events
                .into_iter()
                .map(|e| EventView {
                    event_type: e.event_type,
                    received_at: e.received_at,
                })
                .collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(e) => {
            tracing::error!(%payment_id, error = %e, "event lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}
