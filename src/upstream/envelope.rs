//! Response envelope used by the upstream campaign services.
//!
//! Array payloads arrive either bare or wrapped as
//! `{ "result": { "data": { "data": [...] } } }`. Unwrapping happens here
//! so the analyzers only ever see plain record slices.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AnalyticsError;

fn shape_error() -> AnalyticsError {
    AnalyticsError::UpstreamPayload("expected an array or a result.data.data envelope".to_string())
}

/// Extracts the record array from an enveloped or bare JSON payload.
///
/// # Errors
///
/// Returns [`AnalyticsError::UpstreamPayload`] if the value matches
/// neither shape, or carrying the decoder message if a record fails to
/// deserialize.
pub fn unwrap_records<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, AnalyticsError> {
    let records = match value {
        Value::Array(_) => value,
        Value::Object(mut root) => root
            .remove("result")
            .and_then(|mut result| result.pointer_mut("/data/data").map(Value::take))
            .filter(Value::is_array)
            .ok_or_else(shape_error)?,
        _ => return Err(shape_error()),
    };
    Ok(serde_json::from_value(records)?)
}

/// Same as [`unwrap_records`] for a raw response body.
///
/// # Errors
///
/// Returns [`AnalyticsError::UpstreamPayload`] if the body is not JSON or
/// has an unexpected shape.
pub fn unwrap_records_from_slice<T: DeserializeOwned>(
    body: &[u8],
) -> Result<Vec<T>, AnalyticsError> {
    let value: Value = serde_json::from_slice(body)?;
    unwrap_records(value)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::Message;

    fn message_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "user": "alice",
            "message": "gm",
            "topic": "greetings",
            "timestamp": "2025-01-01T10:00:00Z"
        })
    }

    #[test]
    fn accepts_wrapped_payload() {
        let value = json!({
            "result": { "data": { "data": [message_json("m1"), message_json("m2")] } }
        });
        let Ok(messages) = unwrap_records::<Message>(value) else {
            panic!("wrapped payload should unwrap");
        };
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn accepts_bare_array() {
        let value = json!([message_json("m1")]);
        let Ok(messages) = unwrap_records::<Message>(value) else {
            panic!("bare payload should unwrap");
        };
        assert_eq!(messages.first().map(|m| m.id.as_str()), Some("m1"));
    }

    #[test]
    fn accepts_empty_payloads() {
        let Ok(empty) = unwrap_records::<Message>(json!([])) else {
            panic!("empty array is valid");
        };
        assert!(empty.is_empty());
        let Ok(empty) = unwrap_records::<Message>(json!({"result":{"data":{"data":[]}}})) else {
            panic!("empty envelope is valid");
        };
        assert!(empty.is_empty());
    }

    #[test]
    fn rejects_unexpected_shapes() {
        let result = unwrap_records::<Message>(json!({ "data": [] }));
        assert!(matches!(result, Err(AnalyticsError::UpstreamPayload(_))));

        let result = unwrap_records::<Message>(json!([{ "id": 1 }]));
        assert!(matches!(result, Err(AnalyticsError::UpstreamPayload(_))));
    }

    #[test]
    fn unknown_sentiment_does_not_fail_the_payload() {
        let mut positive = message_json("m1");
        positive["sentiment"] = json!("positive");
        let mut mixed = message_json("m2");
        mixed["sentiment"] = json!("mixed");
        let Ok(messages) = unwrap_records::<Message>(json!([positive, mixed])) else {
            panic!("unknown sentiment label should decode");
        };
        assert_eq!(messages.len(), 2);
        assert!(messages.get(1).is_some_and(|m| m.sentiment.is_none()));
    }

    #[test]
    fn record_errors_keep_the_decoder_message() {
        let mut broken = message_json("m2");
        if let Some(record) = broken.as_object_mut() {
            record.remove("user");
        }
        let value = json!({ "result": { "data": { "data": [message_json("m1"), broken] } } });
        let result = unwrap_records::<Message>(value);
        let Err(AnalyticsError::UpstreamPayload(message)) = result else {
            panic!("a bad record should be a payload error");
        };
        assert!(message.contains("missing field `user`"), "{message}");

        let result = unwrap_records::<Message>(json!({}));
        let Err(AnalyticsError::UpstreamPayload(message)) = result else {
            panic!("an empty object should be a payload error");
        };
        assert!(message.contains("result.data.data"), "{message}");
    }

    #[test]
    fn rejects_non_json_body() {
        let result = unwrap_records_from_slice::<Message>(b"<html>");
        assert!(matches!(result, Err(AnalyticsError::UpstreamPayload(_))));
    }
}
