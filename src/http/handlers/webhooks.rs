use crate::service::ingest::IngestError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub const SIGNATURE_HEADER: &str = "X-Razorpay-Signature";

pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|h| h.to_str().ok());

    match state.ingest.process(&body, signature).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => {
            let status = match &e {
                IngestError::InvalidJson => StatusCode::BAD_REQUEST,
                IngestError::MissingSignature | IngestError::InvalidSignature => {
                    StatusCode::FORBIDDEN
                }
                IngestError::Storage(source) => {
                    tracing::error!(error = %source, "webhook processing failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
