//! # rosterbox-reqwest
//!
//! HTTP [`Transport`](rosterbox::Transport) for rosterbox built on `reqwest`
//! and `reqwest-middleware`.
//!
//! ```rust,ignore
//! use rosterbox::{Credentials, RosterClient, SessionStore};
//! use rosterbox_reqwest::ReqwestTransport;
//!
//! let session = SessionStore::new();
//! let transport = ReqwestTransport::builder("http://localhost:8000")
//!     .session(session.clone())
//!     .build()?;
//! let client = RosterClient::builder(transport).session(session).build();
//! client.auth().login(&Credentials::new("admin", "secret")).await?;
//! ```

mod middleware;
mod transport;

pub use middleware::BearerAuth;
pub use transport::{ReqwestTransport, ReqwestTransportBuilder};

pub use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
