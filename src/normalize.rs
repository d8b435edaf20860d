use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("missing or empty field: {0}")]
    MissingField(&'static str),
}

/// The canonical triple extracted from a provider event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub event_type: String,
    pub event_id: String,
    pub payment_id: String,
}

/// Extracts (event type, event id, payment id) from the Razorpay shape:
/// top-level `event` and `id`, plus `payload.payment.entity.id`. Absent,
/// empty, or non-string values fail with the offending field named.
pub fn normalize(raw: &Value) -> Result<NormalizedEvent, NormalizeError> {
    let event_type = required_str(raw.get("event"), "event")?;
    let event_id = required_str(raw.get("id"), "id")?;
    let payment_id = required_str(
        raw.pointer("/payload/payment/entity/id"),
        "payload.payment.entity.id",
    )?;

    Ok(NormalizedEvent {
        event_type,
        event_id,
        payment_id,
    })
}

fn required_str(value: Option<&Value>, field: &'static str) -> Result<String, NormalizeError> {
    match value.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(NormalizeError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize, NormalizeError, NormalizedEvent};
    use serde_json::json;

    fn valid_event() -> serde_json::Value {
        json!({
            "event": "payment.authorized",
            "id": "evt_1",
            "payload": {
                "payment": {
                    "entity": { "id": "pay_1", "amount": 5000, "currency": "INR" }
                }
            }
        })
    }

    #[test]
    fn extracts_triple() {
        assert_eq!(
            normalize(&valid_event()),
            Ok(NormalizedEvent {
                event_type: "payment.authorized".to_string(),
                event_id: "evt_1".to_string(),
                payment_id: "pay_1".to_string(),
            })
        );
    }

    #[test]
    fn missing_event_type() {
        let mut event = valid_event();
        event.as_object_mut().unwrap().remove("event");
        assert_eq!(normalize(&event), Err(NormalizeError::MissingField("event")));
    }

    #[test]
    fn empty_event_id() {
        let mut event = valid_event();
        event["id"] = json!("");
        assert_eq!(normalize(&event), Err(NormalizeError::MissingField("id")));
    }

    #[test]
    fn missing_intermediate_object() {
        let mut event = valid_event();
        event["payload"] = json!({});
        assert_eq!(
            normalize(&event),
            Err(NormalizeError::MissingField("payload.payment.entity.id"))
        );
    }

    #[test]
    fn wrong_shape_for_payment_id() {
        let mut event = valid_event();
        event["payload"]["payment"]["entity"]["id"] = json!(42);
        assert_eq!(
            normalize(&event),
            Err(NormalizeError::MissingField("payload.payment.entity.id"))
        );
    }

    #[test]
    fn non_object_event() {
        assert!(normalize(&json!("not an object")).is_err());
        assert!(normalize(&json!(null)).is_err());
    }
}
