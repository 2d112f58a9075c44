//! Records exchanged with the roster backend.
//!
//! Backends in the wild disagree on field names and value types, so the
//! volunteer and slot mappers work on raw JSON with the lenient helpers
//! below. The other records have stable shapes and derive their serde impls.

mod auth;
mod location;
mod slot;
mod task;
mod volunteer;

pub use auth::{Credentials, TokenResponse};
pub use location::Location;
pub use slot::{NewSlot, NotificationReceipt, Slot, SlotStatus, SlotUpdate};
pub use task::{EmailTemplate, Publication, TaskManager, TaskTemplate, TaskTemplateDraft};
pub use volunteer::{PreferredTask, Volunteer, VolunteerStatus, VolunteerUpdate};

use serde_json::Value;

/// Returns the value of `key` when the key is present, even if it is `null`.
pub(crate) fn field<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.as_object().and_then(|map| map.get(key))
}

/// JavaScript-style truthiness.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Lenient numeric conversion: numbers, numeric strings and booleans convert,
/// `null` and anything unparsable become `0`.
pub(crate) fn coerce_number(value: &Value) -> i64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    number as i64
}

/// Identifier conversion: non-negative integers or numeric strings, else `0`.
pub(crate) fn id_of(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0)
}

/// Text conversion: strings as-is, numbers and booleans rendered, else `None`.
pub(crate) fn string_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
