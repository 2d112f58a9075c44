use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{field, string_of};

/// Booking state of a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Confirmed,
    #[default]
    Pending,
    Cancelled,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A concrete, dated instance of volunteer work.
///
/// Deserializes through [`Slot::from_backend`], so any JSON value yields a
/// slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Slot {
    /// Identifier, `0` when the backend omitted it.
    pub id: u64,
    /// Assigned volunteer, if any.
    pub volunteer_id: Option<u64>,
    pub date: String,
    pub time: String,
    pub description: String,
    pub status: SlotStatus,
    /// Template this slot was generated from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_template_id: Option<u64>,
}

impl Slot {
    /// Maps a backend slot object.
    ///
    /// Ids accept numbers and numeric strings. Text fields accept strings,
    /// numbers and booleans. `null`, missing or unusable values fall back to
    /// the field default, and an unrecognized status becomes
    /// [`SlotStatus::Unknown`].
    pub fn from_backend(raw: Value) -> Self {
        let text = |key: &str| {
            field(&raw, key)
                .and_then(string_of)
                .unwrap_or_default()
        };
        Self {
            id: field(&raw, "id").and_then(optional_id).unwrap_or(0),
            volunteer_id: field(&raw, "volunteer_id").and_then(optional_id),
            date: text("date"),
            time: text("time"),
            description: text("description"),
            status: field(&raw, "status")
                .filter(|status| !status.is_null())
                .and_then(|status| serde_json::from_value(status.clone()).ok())
                .unwrap_or_default(),
            task_template_id: field(&raw, "task_template_id").and_then(optional_id),
        }
    }
}

impl From<Value> for Slot {
    fn from(raw: Value) -> Self {
        Self::from_backend(raw)
    }
}

fn optional_id(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Body for creating a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlot {
    pub volunteer_id: u64,
    pub date: String,
    pub time: String,
    pub description: String,
    pub status: SlotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_template_id: Option<u64>,
}

/// Partial update for a slot. Fields left `None` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SlotStatus>,
}

/// Acknowledgement returned by reminder endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub message: String,
}
