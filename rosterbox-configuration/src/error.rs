use thiserror::Error;

/// Errors raised while reading or applying a client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration document: {0}")]
    Parse(String),
    #[error("invalid base url {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("paging.{field} must be greater than zero")]
    ZeroPageSize { field: &'static str },
    #[error("slot endpoint {0:?} has no {{id}} placeholder")]
    MissingPlaceholder(String),
    #[error("failed to build transport: {0}")]
    Transport(#[from] rosterbox::ClientError),
}
