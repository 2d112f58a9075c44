use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{coerce_number, field, id_of, string_of, truthy};

/// Whether a volunteer currently takes part in the program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolunteerStatus {
    /// Volunteer can be scheduled.
    #[default]
    Active,
    /// Volunteer is kept on file but not scheduled.
    Inactive,
}

/// Preferred task of a volunteer; backends send either one name or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferredTask {
    /// A single task name.
    One(String),
    /// Several task names.
    Many(Vec<String>),
}

/// A volunteer as used by the client.
///
/// Built from backend JSON with [`Volunteer::from_backend`], which tolerates
/// the different field names backends use for the same facts. The untouched
/// backend object is kept in [`Volunteer::raw`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Volunteer {
    /// Identifier, `0` when the backend omitted it.
    pub id: u64,
    /// Display name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sportlink_member_id: Option<String>,
    /// Points earned, `0` when unknown.
    pub total_points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sanctions: Option<i64>,
    /// Number of booked slots, `0` when unknown.
    pub booked_slots: i64,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_task: Option<PreferredTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Derived from [`Volunteer::is_active`].
    pub status: VolunteerStatus,
    /// Backend object this volunteer was built from.
    #[serde(rename = "_raw")]
    pub raw: Value,
}

impl Volunteer {
    /// Maps a backend volunteer object.
    ///
    /// Name: `"first last"` when either part is non-empty, else `name`, else
    /// `full_name`, else `#<id>`. Activity: `is_active` when the key is present,
    /// else `status == "active"` when present, else active. Points fall back
    /// from `total_points` to `points`, bookings from `booked_slots` to
    /// `bookings`, and the group from `group_number` to `group`.
    pub fn from_backend(raw: Value) -> Self {
        let id = field(&raw, "id").map_or(0, id_of);

        let first = field(&raw, "first_name").and_then(Value::as_str).unwrap_or("");
        let last = field(&raw, "last_name").and_then(Value::as_str).unwrap_or("");
        let name = if !first.is_empty() || !last.is_empty() {
            format!("{first} {last}").trim().to_owned()
        } else {
            field(&raw, "name")
                .and_then(Value::as_str)
                .or_else(|| field(&raw, "full_name").and_then(Value::as_str))
                .map_or_else(|| format!("#{id}"), str::to_owned)
        };

        let is_active = match (field(&raw, "is_active"), field(&raw, "status")) {
            (Some(flag), _) => truthy(flag),
            (None, Some(status)) if !status.is_null() => status.as_str() == Some("active"),
            _ => true,
        };

        let total_points = field(&raw, "total_points")
            .or_else(|| field(&raw, "points"))
            .map_or(0, coerce_number);
        let booked_slots = field(&raw, "booked_slots")
            .or_else(|| field(&raw, "bookings"))
            .map_or(0, coerce_number);
        let group_number = field(&raw, "group_number")
            .filter(|v| !v.is_null())
            .or_else(|| field(&raw, "group"))
            .filter(|v| !v.is_null())
            .map(coerce_number);

        Self {
            id,
            name,
            first_name: field(&raw, "first_name").and_then(string_of),
            last_name: field(&raw, "last_name").and_then(string_of),
            email: field(&raw, "email").and_then(string_of),
            phone: field(&raw, "phone").and_then(string_of),
            address: field(&raw, "address").and_then(string_of),
            group_number,
            notes: field(&raw, "notes").and_then(string_of),
            sportlink_member_id: field(&raw, "sportlink_member_id").and_then(string_of),
            total_points,
            total_sanctions: field(&raw, "total_sanctions").map(coerce_number),
            booked_slots,
            is_active,
            scheduled_task: field(&raw, "scheduled_task").and_then(string_of),
            preferred_task: field(&raw, "preferred_task")
                .and_then(|v| serde_json::from_value(v.clone()).ok()),
            created_at: field(&raw, "created_at").and_then(string_of),
            updated_at: field(&raw, "updated_at").and_then(string_of),
            status: if is_active {
                VolunteerStatus::Active
            } else {
                VolunteerStatus::Inactive
            },
            raw,
        }
    }

    /// Returns `true` when the volunteer holds at least one booking.
    pub fn is_booked(&self) -> bool {
        self.booked_slots > 0
    }
}

impl From<Value> for Volunteer {
    fn from(raw: Value) -> Self {
        Self::from_backend(raw)
    }
}

/// Partial update for a volunteer. Fields left `None` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolunteerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_task: Option<PreferredTask>,
}
