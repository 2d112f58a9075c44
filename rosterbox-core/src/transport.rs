//! Transport abstraction between the roster client and the REST backend.
//!
//! The client never talks to an HTTP library directly. It builds an
//! [`ApiRequest`], hands it to a [`Transport`] and interprets the returned
//! [`ApiResponse`]. This keeps the caching and resolution logic independent of
//! the network stack and lets tests count or script every round trip.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::response::error_message;

/// Body attached to an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `application/json` body.
    Json(Value),
    /// `application/x-www-form-urlencoded` body, fields kept in insertion order.
    Form(Vec<(String, String)>),
}

impl Payload {
    /// Content type header value matching the payload encoding.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    /// Encodes the payload into request body bytes.
    pub fn encode(&self) -> ClientResult<Bytes> {
        match self {
            Self::Json(value) => Ok(Bytes::from(serde_json::to_vec(value)?)),
            Self::Form(fields) => serde_urlencoded::to_string(fields)
                .map(Bytes::from)
                .map_err(ClientError::transport),
        }
    }
}

/// A request addressed relative to the backend base URL.
///
/// The path may already carry a query string (endpoint templates often do);
/// parameters added with [`ApiRequest::query`] are appended after it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL, optionally with an inline query string.
    pub path: String,
    /// Additional query parameters.
    pub query: Vec<(String, String)>,
    /// Optional request body.
    pub payload: Option<Payload>,
}

impl ApiRequest {
    /// Creates a request with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            payload: None,
        }
    }

    /// Creates a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Attaches a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ClientResult<Self> {
        self.payload = Some(Payload::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Attaches a form-encoded body.
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.payload = Some(Payload::Form(fields));
        self
    }

    /// Returns the path followed by every query parameter, URL-encoded.
    pub fn path_and_query(&self) -> ClientResult<String> {
        if self.query.is_empty() {
            return Ok(self.path.clone());
        }
        let encoded = serde_urlencoded::to_string(&self.query).map_err(ClientError::transport)?;
        let separator = if self.path.contains('?') { '&' } else { '?' };
        Ok(format!("{}{separator}{encoded}", self.path))
    }

    /// Splits the request target into the bare path and all query parameters,
    /// inline ones first.
    pub fn target(&self) -> ClientResult<(&str, Vec<(String, String)>)> {
        let (path, inline) = match self.path.split_once('?') {
            Some((path, query)) => (path, query),
            None => (self.path.as_str(), ""),
        };
        let mut params: Vec<(String, String)> =
            serde_urlencoded::from_str(inline).map_err(ClientError::transport)?;
        params.extend(self.query.iter().cloned());
        Ok((path, params))
    }
}

/// A response as seen by the roster client: a status and the raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Response status.
    pub status: StatusCode,
    /// Raw response body.
    pub body: Bytes,
}

impl ApiResponse {
    /// Creates a response from a status and body.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response carrying a JSON body.
    pub fn json(status: StatusCode, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// Creates a `200 OK` response carrying a JSON body.
    pub fn ok(value: &Value) -> Self {
        Self::json(StatusCode::OK, value)
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Converts the response into its JSON body.
    ///
    /// Non-success statuses become [`ClientError::Http`] with a message taken
    /// from the body. An empty body or a JSON `null` yields `Ok(None)`.
    pub fn into_json(self) -> ClientResult<Option<Value>> {
        if !self.is_success() {
            return Err(ClientError::Http {
                status: self.status,
                message: error_message(self.status, &self.body),
            });
        }
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match serde_json::from_slice(&self.body)? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }
}

/// Sends requests to the roster backend.
///
/// Implementations perform exactly one round trip per call: no caching and
/// no retries happen at this level.
///
/// # Examples
///
/// ```rust,ignore
/// use rosterbox_core::{ApiRequest, ApiResponse, ClientResult, Transport};
///
/// struct Fixed(serde_json::Value);
///
/// #[async_trait::async_trait]
/// impl Transport for Fixed {
///     async fn send(&self, _request: ApiRequest) -> ClientResult<ApiResponse> {
///         Ok(ApiResponse::ok(&self.0))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response, whatever its status.
    ///
    /// Only failures that prevent a response from being received are errors.
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;

    /// Returns a short name for this transport, used in logs.
    fn name(&self) -> &str {
        "transport"
    }
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        (**self).send(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl Transport for Box<dyn Transport> {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        (**self).send(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
