//! In-process stand-in for the roster backend.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use http::{Method, StatusCode};
use rosterbox_core::{ApiRequest, ApiResponse, ClientError, ClientResult, Payload, Transport};
use serde_json::{Value, json};
use tracing::debug;

/// Internal state shared across clones.
#[derive(Debug, Default)]
struct MemoryInner {
    volunteers: DashMap<u64, Value>,
    slots: DashMap<u64, Value>,
    next_slot_id: AtomicU64,
    requests: AtomicU64,
}

/// A [`Transport`] answering volunteer, slot and login routes from memory.
///
/// Behaves like the backend for the routes it knows. Updating, deleting or
/// reading a volunteer or slot that does not exist fails with
/// [`ClientError::NotFound`]. Creating a slot bumps the owner's
/// `booked_slots` and deleting it lowers the count again, never below zero.
/// Unknown routes answer `404 {"detail": "Not Found"}`.
///
/// Cloning is cheap and the clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    inner: Arc<MemoryInner>,
    latency: Duration,
}

impl MemoryTransport {
    /// Token handed out by the login route.
    pub const TOKEN: &'static str = "local-token";

    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with backend-shaped volunteer objects keyed by their `id`.
    pub fn with_volunteers(self, volunteers: impl IntoIterator<Item = Value>) -> Self {
        for volunteer in volunteers {
            if let Some(id) = volunteer.get("id").and_then(Value::as_u64) {
                self.inner.volunteers.insert(id, volunteer);
            }
        }
        self
    }

    /// Seeds the store with backend-shaped slot objects keyed by their `id`.
    pub fn with_slots(self, slots: impl IntoIterator<Item = Value>) -> Self {
        for slot in slots {
            if let Some(id) = slot.get("id").and_then(Value::as_u64) {
                self.inner.slots.insert(id, slot);
                self.inner.next_slot_id.fetch_max(id, Ordering::SeqCst);
            }
        }
        self
    }

    /// Delays every answer from this handle by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of requests served so far.
    pub fn request_count(&self) -> u64 {
        self.inner.requests.load(Ordering::SeqCst)
    }

    /// Returns a stored volunteer object.
    pub fn volunteer(&self, id: u64) -> Option<Value> {
        self.inner.volunteers.get(&id).map(|v| v.clone())
    }

    /// Returns a stored slot object.
    pub fn slot(&self, id: u64) -> Option<Value> {
        self.inner.slots.get(&id).map(|s| s.clone())
    }

    fn route(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        let (path, params) = request.target()?;
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let body = match &request.payload {
            Some(Payload::Json(value)) => Some(value),
            _ => None,
        };
        let method = &request.method;

        match segments.as_slice() {
            ["api", "v1", "auth", "login"] if *method == Method::POST => Ok(ApiResponse::ok(
                &json!({"access_token": Self::TOKEN, "token_type": "bearer"}),
            )),
            ["api", "v1", "volunteers"] if *method == Method::GET => {
                let skip = param(&params, "skip").unwrap_or(0);
                let limit = param(&params, "limit").unwrap_or(u64::MAX);
                let page: Vec<Value> = sorted(&self.inner.volunteers)
                    .into_iter()
                    .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                    .take(usize::try_from(limit).unwrap_or(usize::MAX))
                    .collect();
                Ok(ApiResponse::ok(&Value::Array(page)))
            }
            ["api", "v1", "volunteers", id] => {
                let id = parse_id(id, "volunteer")?;
                self.volunteer_route(method, id, body)
            }
            ["api", "slots"] if *method == Method::GET => {
                let owner = param(&params, "volunteer_id");
                let slots: Vec<Value> = sorted(&self.inner.slots)
                    .into_iter()
                    .filter(|slot| owner.is_none() || owner_of(slot) == owner)
                    .collect();
                Ok(ApiResponse::ok(&Value::Array(slots)))
            }
            ["api", "slots"] if *method == Method::POST => self.create_slot(body),
            ["api", "slots", id] => {
                let id = parse_id(id, "slot")?;
                self.slot_route(method, id, body)
            }
            ["api", "slots", id, action] if *method == Method::POST => {
                let id = parse_id(id, "slot")?;
                if !self.inner.slots.contains_key(&id) {
                    return Err(ClientError::NotFound { kind: "slot", id });
                }
                let message = match *action {
                    "send-whatsapp" => "WhatsApp reminder sent successfully!",
                    "send-email" => "Email reminder sent successfully!",
                    _ => return Ok(not_found()),
                };
                Ok(ApiResponse::ok(&json!({ "message": message })))
            }
            _ => Ok(not_found()),
        }
    }

    fn volunteer_route(
        &self,
        method: &Method,
        id: u64,
        body: Option<&Value>,
    ) -> ClientResult<ApiResponse> {
        let missing = ClientError::NotFound {
            kind: "volunteer",
            id,
        };
        match *method {
            Method::GET => self
                .volunteer(id)
                .map(|volunteer| ApiResponse::ok(&volunteer))
                .ok_or(missing),
            Method::PUT => {
                let mut volunteer = self.inner.volunteers.get_mut(&id).ok_or(missing)?;
                merge(&mut volunteer, body);
                Ok(ApiResponse::ok(&volunteer))
            }
            Method::DELETE => {
                self.inner.volunteers.remove(&id).ok_or(missing)?;
                Ok(ApiResponse::new(StatusCode::NO_CONTENT, ""))
            }
            _ => Ok(not_found()),
        }
    }

    fn slot_route(
        &self,
        method: &Method,
        id: u64,
        body: Option<&Value>,
    ) -> ClientResult<ApiResponse> {
        let missing = ClientError::NotFound { kind: "slot", id };
        match *method {
            Method::GET => self.slot(id).map(|slot| ApiResponse::ok(&slot)).ok_or(missing),
            Method::PUT => {
                let mut slot = self.inner.slots.get_mut(&id).ok_or(missing)?;
                merge(&mut slot, body);
                Ok(ApiResponse::ok(&slot))
            }
            Method::DELETE => {
                let (_, slot) = self.inner.slots.remove(&id).ok_or(missing)?;
                if let Some(owner) = owner_of(&slot) {
                    self.adjust_bookings(owner, -1);
                }
                Ok(ApiResponse::new(StatusCode::NO_CONTENT, ""))
            }
            _ => Ok(not_found()),
        }
    }

    fn create_slot(&self, body: Option<&Value>) -> ClientResult<ApiResponse> {
        let Some(Value::Object(fields)) = body else {
            return Ok(ApiResponse::json(
                StatusCode::UNPROCESSABLE_ENTITY,
                &json!({"detail": "slot body must be a JSON object"}),
            ));
        };
        let id = self.inner.next_slot_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut slot = fields.clone();
        slot.insert("id".to_owned(), json!(id));
        let slot = Value::Object(slot);
        if let Some(owner) = owner_of(&slot) {
            self.adjust_bookings(owner, 1);
        }
        self.inner.slots.insert(id, slot.clone());
        Ok(ApiResponse::json(StatusCode::CREATED, &slot))
    }

    fn adjust_bookings(&self, volunteer_id: u64, delta: i64) {
        if let Some(mut volunteer) = self.inner.volunteers.get_mut(&volunteer_id) {
            let current = volunteer
                .get("booked_slots")
                .and_then(Value::as_i64)
                .unwrap_or(0);
            let updated = (current + delta).max(0);
            if let Some(map) = volunteer.as_object_mut() {
                map.insert("booked_slots".to_owned(), json!(updated));
            }
        }
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.inner.requests.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        debug!(method = %request.method, path = %request.path, "local store request");
        self.route(&request)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn not_found() -> ApiResponse {
    ApiResponse::json(StatusCode::NOT_FOUND, &json!({"detail": "Not Found"}))
}

fn parse_id(raw: &str, kind: &'static str) -> ClientResult<u64> {
    raw.parse()
        .map_err(|_| ClientError::Shape(format!("invalid {kind} id {raw:?}")))
}

fn param(params: &[(String, String)], name: &str) -> Option<u64> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| value.parse().ok())
}

fn owner_of(slot: &Value) -> Option<u64> {
    slot.get("volunteer_id").and_then(Value::as_u64)
}

fn sorted(table: &DashMap<u64, Value>) -> Vec<Value> {
    table
        .iter()
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}

/// Shallow merge of a JSON object body into a stored record. The id is kept.
fn merge(target: &mut Value, patch: Option<&Value>) {
    let (Some(target), Some(Value::Object(patch))) = (target.as_object_mut(), patch) else {
        return;
    };
    let id = target.get("id").cloned();
    target.extend(patch.clone());
    if let Some(id) = id {
        target.insert("id".to_owned(), id);
    }
}
