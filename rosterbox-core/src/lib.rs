//! # rosterbox-core
//!
//! Core types for the rosterbox volunteer roster client.
//!
//! This crate holds everything that does not depend on an async runtime or a
//! concrete HTTP stack:
//!
//! - **Keys** identifying memoized reads ([`CacheKey`])
//! - **Errors** shared by every layer ([`ClientError`])
//! - **Transport** seam between the client and the network ([`Transport`],
//!   [`ApiRequest`], [`ApiResponse`])
//! - **Decoding** of the list shapes backends return ([`decode_list`])
//! - **Records** exchanged with the backend ([`model`])
//!
//! The caching client lives in the `rosterbox` crate, and the reqwest-based
//! transport in `rosterbox-reqwest`.

pub mod error;
pub mod key;
pub mod model;
pub mod response;
pub mod transport;

pub use error::{ClientError, ClientResult, TransportSource};
pub use key::CacheKey;
pub use model::*;
pub use response::{ListResponse, decode_list, decode_list_as, decode_record, error_message};
pub use transport::{ApiRequest, ApiResponse, Payload, Transport};
