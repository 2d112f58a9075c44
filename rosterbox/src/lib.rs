//! # rosterbox
//!
//! Caching data-access client for a volunteer roster backend.
//!
//! Volunteer pages and records are memoized for the lifetime of a
//! [`RosterClient`]: concurrent identical reads share one round trip, and
//! successful results are served from memory afterwards. Everything else is a
//! thin typed wrapper over a [`Transport`].
//!
//! ```rust,ignore
//! use rosterbox::{MemoryTransport, RosterClient};
//!
//! let client = RosterClient::new(MemoryTransport::new());
//! let volunteers = client.volunteers().all().await?;
//! let slots = client.slots().for_volunteer(volunteers[0].id).await?;
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Whole-collection reads over offset/limit pages.
pub mod aggregate;

/// Typed client and its per-resource views.
pub mod client;

/// Summary counts over volunteers and slots.
pub mod dashboard;

/// In-process backend stand-in.
pub mod local;

/// Single-flight memo tables.
///
/// A [`MemoTable`](memo::MemoTable) keeps successful fetch results for the
/// lifetime of its owner and makes concurrent callers for one key share a
/// single fetch.
pub mod memo;

/// Metrics collection.
///
/// When the `metrics` feature is enabled, memo lookups, upstream fetches and
/// resolver attempts are counted.
pub mod metrics;

/// Client behaviour: paging, slot routes and record hit semantics.
pub mod policy;

/// Ordered fallback over alternative routes.
pub mod resolver;

/// Login token storage shared by a client and its transport.
pub mod session;

pub use aggregate::collect_all;
pub use client::{Auth, Locations, RosterClient, RosterClientBuilder, Slots, TaskTemplates, Volunteers};
pub use dashboard::DashboardStats;
pub use local::MemoryTransport;
pub use memo::MemoTable;
pub use policy::{ClientPolicy, PagingPolicy, RecordHitPolicy, SlotPolicy};
pub use resolver::{EndpointCandidates, first_success};
pub use session::SessionStore;

pub use rosterbox_core::{
    ApiRequest, ApiResponse, CacheKey, ClientError, ClientResult, Credentials, EmailTemplate,
    Location, NewSlot, NotificationReceipt, Payload, Publication, Slot, SlotStatus, SlotUpdate,
    TaskManager, TaskTemplate, TaskTemplateDraft, TokenResponse, Transport, Volunteer,
    VolunteerStatus, VolunteerUpdate, model,
};

/// The `rosterbox` prelude.
///
/// ```rust
/// use rosterbox::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{ClientError, ClientResult, RosterClient, Transport};
}
