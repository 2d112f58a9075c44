//! Scripted in-memory transport for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use http::StatusCode;
use rosterbox::{ApiRequest, ApiResponse, ClientError, ClientResult, Transport};
use serde_json::{Value, json};

#[derive(Clone)]
enum Scripted {
    Respond(ApiResponse),
    Fail(String),
}

/// Transport answering from a table of scripted responses keyed by
/// `path?query`, counting every request.
///
/// Unscripted targets answer `404 {"detail": "Not Found"}`.
#[derive(Clone, Default)]
pub struct CountingTransport {
    routes: Arc<DashMap<String, Scripted>>,
    hits: Arc<DashMap<String, usize>>,
    total: Arc<AtomicUsize>,
    delay: Duration,
}

impl CountingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every answer, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn respond(&self, target: &str, status: StatusCode, body: impl Into<String>) {
        self.routes.insert(
            target.to_owned(),
            Scripted::Respond(ApiResponse::new(status, body.into())),
        );
    }

    pub fn json(&self, target: &str, body: Value) {
        self.respond(target, StatusCode::OK, body.to_string());
    }

    /// Makes `target` fail before any response, like a dropped connection.
    pub fn fail(&self, target: &str, message: &str) {
        self.routes
            .insert(target.to_owned(), Scripted::Fail(message.to_owned()));
    }

    /// Number of requests sent to `target`.
    pub fn hits(&self, target: &str) -> usize {
        self.hits.get(target).map(|count| *count).unwrap_or(0)
    }

    /// Number of requests sent in total.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for CountingTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let target = request.path_and_query()?;
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.hits.entry(target.clone()).or_insert(0) += 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let scripted = self.routes.get(&target).map(|route| route.clone());
        match scripted {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => {
                Err(ClientError::transport(std::io::Error::other(message)))
            }
            None => Ok(ApiResponse::json(
                StatusCode::NOT_FOUND,
                &json!({"detail": "Not Found"}),
            )),
        }
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Backend-shaped volunteer objects with ids `start..start + count`.
pub fn volunteers(start: u64, count: u64) -> Value {
    Value::Array(
        (start..start + count)
            .map(|id| json!({"id": id, "first_name": format!("Volunteer {id}")}))
            .collect(),
    )
}

/// Page target as the client builds it.
pub fn page(offset: u64, limit: u64) -> String {
    format!("/api/v1/volunteers?skip={offset}&limit={limit}")
}

/// Installs a test-writer subscriber honouring `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
