//! Bearer token middleware for reqwest-middleware.

use async_trait::async_trait;
use http::Extensions;
use http::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use rosterbox::SessionStore;
use tracing::{trace, warn};

/// Adds `Authorization: Bearer <token>` to every request while the session
/// holds a token.
///
/// The session is read on each request, so logging in or out through a
/// [`RosterClient`](rosterbox::RosterClient) sharing the same store takes
/// effect immediately. Requests that already carry an `Authorization`
/// header are left alone.
#[derive(Clone, Debug)]
pub struct BearerAuth {
    session: SessionStore,
}

impl BearerAuth {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Middleware for BearerAuth {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if !req.headers().contains_key(AUTHORIZATION)
            && let Some(authorization) = self.session.authorization()
        {
            match HeaderValue::from_str(&authorization) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    req.headers_mut().insert(AUTHORIZATION, value);
                    trace!(url = %req.url(), "attached bearer token");
                }
                Err(error) => warn!(%error, "session token is not a valid header value"),
            }
        }
        next.run(req, extensions).await
    }
}
