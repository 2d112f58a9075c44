//! Ordered "first success wins" resolution over alternative backend routes.

use std::future::Future;

use rosterbox_core::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metrics::record_resolver_attempt;

/// Tries each candidate in order and returns the first successful result.
///
/// Later candidates are not tried once one succeeds. When every candidate
/// fails, the error of the last attempt is returned as-is. An empty candidate
/// list fails with [`ClientError::NoCandidates`].
pub async fn first_success<C, T, F, Fut>(
    candidates: impl IntoIterator<Item = C>,
    mut attempt: F,
) -> ClientResult<T>
where
    F: FnMut(C) -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let mut last_error = None;
    let mut attempts = 0usize;
    for candidate in candidates {
        attempts += 1;
        match attempt(candidate).await {
            Ok(value) => {
                record_resolver_attempt(true);
                return Ok(value);
            }
            Err(error) => {
                record_resolver_attempt(false);
                debug!(attempt = attempts, %error, "candidate failed");
                last_error = Some(error);
            }
        }
    }
    match last_error {
        Some(error) => {
            warn!(attempts, %error, "every candidate failed");
            Err(error)
        }
        None => Err(ClientError::NoCandidates),
    }
}

/// Ordered route templates for a per-owner lookup.
///
/// Each template contains the [`EndpointCandidates::PLACEHOLDER`] marker,
/// replaced by the owner id when rendered.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct EndpointCandidates(Vec<String>);

impl EndpointCandidates {
    /// Marker replaced by the owner id.
    pub const PLACEHOLDER: &'static str = "{id}";

    /// Routes probed for the slots of one volunteer, in order.
    pub const VOLUNTEER_SLOTS: [&'static str; 5] = [
        "/api/slots?volunteer_id={id}",
        "/api/v1/slots?volunteer_id={id}",
        "/api/volunteers/{id}/slots",
        "/api/v1/volunteers/{id}/slots",
        "/api/slots/volunteer/{id}",
    ];

    pub fn new<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(templates.into_iter().map(Into::into).collect())
    }

    /// Returns the raw templates.
    pub fn templates(&self) -> &[String] {
        &self.0
    }

    /// Returns the first template lacking the placeholder, if any.
    pub fn missing_placeholder(&self) -> Option<&str> {
        self.0
            .iter()
            .find(|template| !template.contains(Self::PLACEHOLDER))
            .map(String::as_str)
    }

    /// Renders every template for `id`, in order.
    pub fn render(&self, id: u64) -> impl Iterator<Item = String> + '_ {
        let id = id.to_string();
        self.0
            .iter()
            .map(move |template| template.replace(Self::PLACEHOLDER, &id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for EndpointCandidates {
    fn default() -> Self {
        Self::new(Self::VOLUNTEER_SLOTS)
    }
}
