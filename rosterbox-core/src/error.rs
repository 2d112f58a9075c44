//! Error types for roster client operations.

use std::sync::Arc;

use http::StatusCode;
use thiserror::Error;

/// Shared, type-erased error coming from the network stack.
pub type TransportSource = Arc<dyn std::error::Error + Send + Sync>;

/// Error type for roster client operations.
///
/// The enum is `Clone` so a single failure inside a de-duplicated fetch can be
/// handed to every caller awaiting it. Inner errors that are not `Clone`
/// themselves are kept behind an [`Arc`].
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The request failed before any response was received.
    ///
    /// The message is the message of the underlying transport error.
    #[error("{0}")]
    Transport(TransportSource),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Http {
        /// Response status.
        status: StatusCode,
        /// Message extracted from the error body.
        message: String,
    },

    /// The server answered successfully but the body had an unexpected shape.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// The body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    Decode(Arc<serde_json::Error>),

    /// A record addressed by id does not exist in the local store.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind, e.g. `"volunteer"`.
        kind: &'static str,
        /// Identifier that was looked up.
        id: u64,
    },

    /// Login succeeded at the HTTP level but produced no usable token.
    #[error("login failed: {0}")]
    Auth(String),

    /// An endpoint resolver was given no candidates to try.
    #[error("no endpoint candidates to try")]
    NoCandidates,
}

impl ClientError {
    /// Wraps an arbitrary transport error.
    pub fn transport<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Arc::new(error))
    }

    /// Returns the HTTP status for [`ClientError::Http`] failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for the not-found domain failure or an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(Arc::new(error))
    }
}

/// Result alias used across the roster client.
pub type ClientResult<T> = Result<T, ClientError>;
