//! # rosterbox-configuration
//!
//! Builds a [`RosterClient`](rosterbox::RosterClient) from a YAML document.
//!
//! ```yaml
//! base_url: http://localhost:8000
//! transport: Http
//! request_timeout: 30s
//! paging:
//!   bulk_limit: 10000
//!   page_size: 500
//! records:
//!   hit_policy: SkipVacant
//! ```

mod client;
mod error;

pub use client::{BASE_URL_ENV, ConfigClient, DEFAULT_BASE_URL, RecordsConfig, TransportKind};
pub use error::ConfigError;
