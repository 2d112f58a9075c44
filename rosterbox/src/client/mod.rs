//! Typed roster client.

mod auth;
mod locations;
mod slots;
mod tasks;
mod volunteers;

pub use auth::Auth;
pub use locations::Locations;
pub use slots::Slots;
pub use tasks::TaskTemplates;
pub use volunteers::Volunteers;

use std::fmt;
use std::sync::Arc;

use rosterbox_core::{ApiRequest, ApiResponse, CacheKey, ClientResult, Transport, Volunteer};
use serde_json::Value;
use tracing::{Instrument, debug_span};

use crate::memo::MemoTable;
use crate::policy::ClientPolicy;
use crate::session::SessionStore;

pub(crate) struct ClientInner<T> {
    pub(crate) transport: T,
    pub(crate) session: SessionStore,
    pub(crate) policy: ClientPolicy,
    /// `None` marks a page answered without a body; it is never a hit.
    pub(crate) pages: MemoTable<CacheKey, Option<Vec<Volunteer>>>,
    pub(crate) records: MemoTable<CacheKey, Option<Volunteer>>,
}

/// Client for the roster backend.
///
/// Owns the memo tables for volunteer reads, so two clients never share
/// cached data. Cloning is cheap and the clones share state.
///
/// ```rust,ignore
/// let client = RosterClient::new(MemoryTransport::new());
/// let page = client.volunteers().list(0, 100).await?;
/// let everyone = client.volunteers().all().await?;
/// ```
pub struct RosterClient<T> {
    inner: Arc<ClientInner<T>>,
}

impl<T> Clone for RosterClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for RosterClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RosterClient")
            .field("policy", &self.inner.policy)
            .field("pages", &self.inner.pages)
            .field("records", &self.inner.records)
            .finish_non_exhaustive()
    }
}

impl<T> RosterClient<T>
where
    T: Transport + 'static,
{
    /// Creates a client with default policy and a fresh session.
    pub fn new(transport: T) -> Self {
        Self::builder(transport).build()
    }

    pub fn builder(transport: T) -> RosterClientBuilder<T> {
        RosterClientBuilder {
            transport,
            session: None,
            policy: ClientPolicy::default(),
        }
    }

    pub fn auth(&self) -> Auth<'_, T> {
        Auth::new(self)
    }

    pub fn volunteers(&self) -> Volunteers<'_, T> {
        Volunteers::new(self)
    }

    pub fn slots(&self) -> Slots<'_, T> {
        Slots::new(self)
    }

    pub fn task_templates(&self) -> TaskTemplates<'_, T> {
        TaskTemplates::new(self)
    }

    pub fn locations(&self) -> Locations<'_, T> {
        Locations::new(self)
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn policy(&self) -> &ClientPolicy {
        &self.inner.policy
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Drops every memoized volunteer page and record.
    pub fn clear_cache(&self) {
        self.inner.pages.clear();
        self.inner.records.clear();
    }

    pub(crate) fn inner(&self) -> &ClientInner<T> {
        &self.inner
    }

    /// Sends one request and returns the raw response, whatever its status.
    pub(crate) async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let span = debug_span!(
            "roster_request",
            transport = self.inner.transport.name(),
            method = %request.method,
            path = %request.path,
        );
        self.inner.transport.send(request).instrument(span).await
    }

    /// Sends one request and decodes its JSON body, failing on non-2xx.
    pub(crate) async fn send_json(&self, request: ApiRequest) -> ClientResult<Option<Value>> {
        self.send(request).await?.into_json()
    }
}

/// Builder for [`RosterClient`].
pub struct RosterClientBuilder<T> {
    transport: T,
    session: Option<SessionStore>,
    policy: ClientPolicy,
}

impl<T> RosterClientBuilder<T>
where
    T: Transport + 'static,
{
    /// Shares an existing session, e.g. with a transport that reads the token.
    pub fn session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn policy(mut self, policy: ClientPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> RosterClient<T> {
        let records =
            MemoTable::with_hit_predicate("volunteer_records", self.policy.records.predicate());
        RosterClient {
            inner: Arc::new(ClientInner {
                transport: self.transport,
                session: self.session.unwrap_or_default(),
                pages: MemoTable::with_hit_predicate("volunteer_pages", Option::is_some),
                records,
                policy: self.policy,
            }),
        }
    }
}
