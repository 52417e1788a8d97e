//! Response decoding (raw body -> typed result).
//!
//! Pure functions: no I/O, no logging of bodies.

use crate::types::{Classification, ModelStatus};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ClassificationWire {
    class_name: String,
    confidence: f64,
}

#[derive(Deserialize)]
struct StatusWire {
    status: i64,
    msg: String,
}

/// Decode a classify response: a JSON array whose first element is
/// `{"class_name": <string>, "confidence": <number>}`.
pub fn decode_classification(input: &str, body: &str) -> Result<Classification> {
    let value: Value = serde_json::from_str(body).map_err(|e| Error::malformed_json(e, body))?;
    let first = match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed("classification array is empty", body))?,
        _ => return Err(Error::malformed("expected a JSON array", body)),
    };
    if !first.is_object() {
        return Err(Error::malformed("first element is not an object", body));
    }

    let wire: ClassificationWire = serde_json::from_value(first).map_err(|e| {
        Error::MalformedResponse {
            message: format!("invalid classification: {}", e),
            body: body.to_string(),
            source: Some(e),
        }
    })?;

    if !(0.0..=100.0).contains(&wire.confidence) {
        return Err(Error::malformed(
            format!("confidence {} is outside [0, 100]", wire.confidence),
            body,
        ));
    }

    Ok(Classification::new(
        input.to_string(),
        wire.class_name,
        wire.confidence,
    ))
}

/// Decode a status response: `{"status": <integer>, "msg": <string>}`.
pub fn decode_model_status(body: &str) -> Result<ModelStatus> {
    let value: Value = serde_json::from_str(body).map_err(|e| Error::malformed_json(e, body))?;
    if !value.is_object() {
        return Err(Error::malformed("expected a JSON object", body));
    }
    let wire: StatusWire = serde_json::from_value(value).map_err(|e| Error::MalformedResponse {
        message: format!("invalid model status: {}", e),
        body: body.to_string(),
        source: Some(e),
    })?;
    Ok(ModelStatus::new(wire.status, wire.msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_malformed<T: std::fmt::Debug>(r: Result<T>) -> bool {
        matches!(r, Err(Error::MalformedResponse { .. }))
    }

    #[test]
    fn decodes_first_element() {
        let c = decode_classification(
            "Test",
            r#"[{"class_name":"Good","confidence":18.9},{"class_name":"Bad","confidence":3}]"#,
        )
        .unwrap();
        assert_eq!(c.input(), "Test");
        assert_eq!(c.label(), "Good");
        assert_eq!(c.confidence(), 18.9);
    }

    #[test]
    fn integer_confidence_is_accepted() {
        let c = decode_classification("x", r#"[{"class_name":"A","confidence":100}]"#).unwrap();
        assert_eq!(c.confidence(), 100.0);
    }

    #[test]
    fn rejects_bodies_that_do_not_match_the_schema() {
        for body in [
            "not json",
            "",
            r#"{"class_name":"Good","confidence":18.9}"#,
            "[]",
            "[1]",
            r#"[{"confidence":18.9}]"#,
            r#"[{"class_name":"Good"}]"#,
            r#"[{"class_name":7,"confidence":18.9}]"#,
            r#"[{"class_name":"Good","confidence":"high"}]"#,
            r#"[{"class_name":"Good","confidence":180}]"#,
        ] {
            assert!(
                is_malformed(decode_classification("x", body)),
                "body {:?} should be malformed",
                body
            );
        }
    }

    #[test]
    fn json_errors_keep_their_source() {
        let err = decode_classification("x", "{").unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn decodes_model_status() {
        let s = decode_model_status(r#"{"status": 2, "msg": "Ready"}"#).unwrap();
        assert_eq!(s.status_code(), 2);
        assert_eq!(s.message(), "Ready");
    }

    #[test]
    fn rejects_invalid_model_status() {
        for body in [
            "",
            "[]",
            r#"[{"status":2,"msg":"Ready"}]"#,
            r#"{"status":"2","msg":"Ready"}"#,
            r#"{"status":2.5,"msg":"Ready"}"#,
            r#"{"status":2}"#,
            r#"{"msg":"Ready"}"#,
        ] {
            assert!(
                is_malformed(decode_model_status(body)),
                "body {:?} should be malformed",
                body
            );
        }
    }
}
