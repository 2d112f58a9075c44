use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A recurring volunteer job definition from which slots are generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_color: Option<String>,
    /// Points earned per completed slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_value: Option<i64>,
    /// Default slot length in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_task_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_volunteers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_volunteers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_age: Option<u32>,
    /// `"M"`, `"F"`, or absent for both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_diploma_association: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_diploma_bond: Option<String>,
    #[serde(default)]
    pub publish_on_website: bool,
    #[serde(default)]
    pub publish_on_mobile: bool,
    #[serde(default)]
    pub allow_registration: bool,
    #[serde(default)]
    pub allow_swapping: bool,
    /// Fields this client does not model, kept for round trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskTemplate {
    /// Returns the publication flags of this template.
    pub fn publication(&self) -> Publication {
        Publication {
            publish_on_website: self.publish_on_website,
            publish_on_mobile: self.publish_on_mobile,
            allow_registration: self.allow_registration,
            allow_swapping: self.allow_swapping,
        }
    }
}

/// Body for creating or updating a task template. Fields left `None` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskTemplateDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_task_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_volunteers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_volunteers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_diploma_association: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_diploma_bond: Option<String>,
}

/// Publication and registration rules of a task template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(default)]
    pub publish_on_website: bool,
    #[serde(default)]
    pub publish_on_mobile: bool,
    #[serde(default)]
    pub allow_registration: bool,
    #[serde(default)]
    pub allow_swapping: bool,
}

/// Reminder e-mail sent for slots of a task template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    #[serde(default = "EmailTemplate::default_sender")]
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body_html: String,
}

impl EmailTemplate {
    /// Sender used when a template does not name one.
    pub const DEFAULT_SENDER: &'static str = "no-reply@sportlinkservices.nl";

    fn default_sender() -> String {
        Self::DEFAULT_SENDER.to_owned()
    }
}

impl Default for EmailTemplate {
    fn default() -> Self {
        Self {
            sender: Self::default_sender(),
            subject: String::new(),
            body_html: String::new(),
        }
    }
}

/// A user allowed to manage a task template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskManager {
    #[serde(alias = "user_id")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
