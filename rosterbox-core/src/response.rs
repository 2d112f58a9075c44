//! Decoding of backend response bodies.
//!
//! List endpoints answer either with a bare array or with an object wrapping
//! the array in a `results` field. [`ListResponse`] models both shapes
//! explicitly and [`decode_list`] turns a body into a sequence or a
//! [`ClientError::Shape`] failure.

use http::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// The accepted shapes of a list response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// `[ ... ]`
    Items(Vec<T>),
    /// `{ "results": [ ... ], ... }`
    Paged {
        /// The listed records.
        results: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    /// Returns the listed records in server order.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Items(items) | Self::Paged { results: items } => items,
        }
    }
}

/// Decodes a list body into raw JSON records.
///
/// Fails with [`ClientError::Shape`] when the body is neither an array nor an
/// object with an array `results` field.
pub fn decode_list(body: Value) -> ClientResult<Vec<Value>> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(ClientError::Shape(Value::Object(map).to_string())),
        },
        other => Err(ClientError::Shape(other.to_string())),
    }
}

/// Decodes a list body into typed records.
pub fn decode_list_as<T: DeserializeOwned>(body: Value) -> ClientResult<Vec<T>> {
    decode_list(body)?
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(ClientError::from))
        .collect()
}

/// Decodes a single JSON record, reporting a missing body as a shape failure.
pub fn decode_record<T: DeserializeOwned>(body: Option<Value>) -> ClientResult<T> {
    let body = body.ok_or_else(|| ClientError::Shape("empty body".to_owned()))?;
    Ok(serde_json::from_value(body)?)
}

/// Extracts a human readable message from an error response body.
///
/// Uses the `detail` field of a JSON object when present (strings as-is,
/// other values serialized), otherwise the raw body text, otherwise a generic
/// message carrying the status code.
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text) {
        match map.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => return detail.clone(),
            Some(Value::Null) | Some(Value::String(_)) | None => {}
            Some(detail) => return detail.to_string(),
        }
    }
    if text.trim().is_empty() {
        format!("HTTP error! status: {}", status.as_u16())
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_and_results_shapes() {
        assert_eq!(decode_list(json!([{"id": 1}])).unwrap(), vec![json!({"id": 1})]);
        assert_eq!(
            decode_list(json!({"results": [{"id": 2}], "count": 1})).unwrap(),
            vec![json!({"id": 2})]
        );
        let typed: ListResponse<u32> = serde_json::from_value(json!({"results": [4, 5]})).unwrap();
        assert_eq!(typed.into_items(), vec![4, 5]);
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert!(matches!(
            decode_list(json!({"items": []})),
            Err(ClientError::Shape(_))
        ));
        assert!(matches!(
            decode_list(json!({"results": "nope"})),
            Err(ClientError::Shape(_))
        ));
        assert!(matches!(decode_list(json!(42)), Err(ClientError::Shape(_))));
    }

    #[test]
    fn test_empty_list_is_valid() {
        assert!(decode_list(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_error_message_prefers_detail() {
        let body = br#"{"detail": "Volunteer not found"}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "Volunteer not found"
        );
    }

    #[test]
    fn test_error_message_serializes_structured_detail() {
        let body = br#"{"detail": [{"loc": ["query", "skip"]}]}"#;
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, body),
            r#"[{"loc":["query","skip"]}]"#
        );
    }

    #[test]
    fn test_error_message_falls_back_to_text_then_status() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, b"upstream down"),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, b""),
            "HTTP error! status: 500"
        );
        assert_eq!(
            error_message(StatusCode::CONFLICT, br#"{"error": "dup"}"#),
            r#"{"error": "dup"}"#
        );
    }
}
