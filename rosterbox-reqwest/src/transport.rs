//! `Transport` implementation over a reqwest-middleware client.

use std::time::Duration;

use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use rosterbox::{ApiRequest, ApiResponse, ClientError, ClientResult, SessionStore, Transport};
use tracing::debug;

use crate::middleware::BearerAuth;

/// Sends [`ApiRequest`]s to a backend at `base_url` with reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl ReqwestTransport {
    /// Wraps an already configured middleware client.
    pub fn new(client: ClientWithMiddleware, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn builder(base_url: impl Into<String>) -> ReqwestTransportBuilder {
        ReqwestTransportBuilder {
            base_url: base_url.into(),
            session: None,
            timeout: None,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> ClientResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{}", request.path_and_query()?)).map_err(ClientError::transport)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = self.url_for(&request)?;
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(ACCEPT, "application/json");
        if let Some(payload) = &request.payload {
            builder = builder
                .header(CONTENT_TYPE, payload.content_type())
                .body(payload.encode()?);
        }

        let response = builder.send().await.map_err(ClientError::transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::transport)?;
        debug!(%status, bytes = body.len(), "backend answered");
        Ok(ApiResponse::new(status, body))
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}

/// Builder for [`ReqwestTransport`].
pub struct ReqwestTransportBuilder {
    base_url: String,
    session: Option<SessionStore>,
    timeout: Option<Duration>,
}

impl ReqwestTransportBuilder {
    /// Attaches the session whose token is sent as a bearer header.
    pub fn session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> ClientResult<ReqwestTransport> {
        let base_url = Url::parse(&self.base_url).map_err(ClientError::transport)?;
        let mut client = Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client.build().map_err(ClientError::transport)?;

        let mut middleware = ClientBuilder::new(client);
        if let Some(session) = self.session {
            middleware = middleware.with(BearerAuth::new(session));
        }
        Ok(ReqwestTransport::new(middleware.build(), base_url))
    }
}
