use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use rosterbox::{
    ClientPolicy, MemoryTransport, PagingPolicy, RecordHitPolicy, RosterClient, SessionStore,
    SlotPolicy, Transport,
};
use rosterbox_reqwest::ReqwestTransport;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Environment variable that replaces the configured base URL.
pub const BASE_URL_ENV: &str = "ROSTERBOX_API_URL";

/// Base URL used when neither the document nor the environment names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Which backend the built client talks to.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum TransportKind {
    /// The HTTP backend at `base_url`.
    #[default]
    Http,
    /// An in-process store, for demos and offline work.
    Memory,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub struct RecordsConfig {
    #[serde(default)]
    pub hit_policy: RecordHitPolicy,
}

/// Client configuration as read from YAML.
///
/// Every field is optional; an empty document yields an HTTP client for
/// [`DEFAULT_BASE_URL`] with the default policies.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConfigClient {
    #[serde(default = "ConfigClient::default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub transport: TransportKind,
    /// Per-request timeout of the HTTP transport (e.g. "30s", "500ms").
    #[serde(default, with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
    #[serde(default)]
    pub paging: PagingPolicy,
    #[serde(default)]
    pub slots: SlotPolicy,
    #[serde(default)]
    pub records: RecordsConfig,
}

impl Default for ConfigClient {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            transport: TransportKind::default(),
            request_timeout: None,
            paging: PagingPolicy::default(),
            slots: SlotPolicy::default(),
            records: RecordsConfig::default(),
        }
    }
}

impl ConfigClient {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_owned()
    }

    /// Parses a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parses a YAML document and applies [`BASE_URL_ENV`] when it is set.
    pub fn load(yaml: &str) -> Result<Self, ConfigError> {
        let config = Self::from_yaml(yaml)?;
        Ok(config.override_base_url(std::env::var(BASE_URL_ENV).ok()))
    }

    /// Replaces the base URL with `url` unless it is absent or blank.
    pub fn override_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url
            && !url.trim().is_empty()
        {
            debug!(base_url = %url, "base url overridden");
            self.base_url = url;
        }
        self
    }

    /// Checks the values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(error) = Url::parse(&self.base_url) {
            return Err(ConfigError::BaseUrl {
                url: self.base_url.clone(),
                reason: error.to_string(),
            });
        }
        if self.paging.bulk_limit == 0 {
            return Err(ConfigError::ZeroPageSize {
                field: "bulk_limit",
            });
        }
        if self.paging.page_size == 0 {
            return Err(ConfigError::ZeroPageSize { field: "page_size" });
        }
        if let Some(template) = self.slots.endpoints.missing_placeholder() {
            return Err(ConfigError::MissingPlaceholder(template.to_owned()));
        }
        Ok(())
    }

    /// Returns the client behaviour described by this configuration.
    pub fn policy(&self) -> ClientPolicy {
        ClientPolicy {
            paging: self.paging,
            slots: self.slots.clone(),
            records: self.records.hit_policy,
        }
    }

    /// Validates the configuration and builds a client with a fresh session.
    pub fn into_client(self) -> Result<RosterClient<Arc<dyn Transport>>, ConfigError> {
        self.validate()?;
        let session = SessionStore::new();
        let transport: Arc<dyn Transport> = match self.transport {
            TransportKind::Http => {
                let mut builder =
                    ReqwestTransport::builder(self.base_url.as_str()).session(session.clone());
                if let Some(timeout) = self.request_timeout {
                    builder = builder.timeout(timeout);
                }
                Arc::new(builder.build()?)
            }
            TransportKind::Memory => Arc::new(MemoryTransport::new()),
        };
        debug!(transport = transport.name(), base_url = %self.base_url, "roster client configured");

        Ok(RosterClient::builder(transport)
            .session(session)
            .policy(self.policy())
            .build())
    }
}
