use rosterbox_core::{ApiRequest, ClientError, ClientResult, Credentials, TokenResponse, Transport};
use tracing::info;

use super::RosterClient;

/// Login endpoint, OAuth2 password flow.
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Login and logout.
pub struct Auth<'a, T> {
    client: &'a RosterClient<T>,
}

impl<'a, T> Auth<'a, T>
where
    T: Transport + 'static,
{
    pub(crate) fn new(client: &'a RosterClient<T>) -> Self {
        Self { client }
    }

    /// Logs in with a form-encoded password grant and keeps the token in the
    /// client's session.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<TokenResponse> {
        let request = ApiRequest::post(LOGIN_PATH).form(credentials.form_fields());
        let body = self
            .client
            .send_json(request)
            .await?
            .ok_or_else(|| ClientError::Auth("empty response".to_owned()))?;
        let token = TokenResponse::from_value(body)?;
        self.client.session().store_token(&token);
        info!(username = %credentials.username, "logged in");
        Ok(token)
    }

    /// Forgets the session token.
    pub fn logout(&self) {
        self.client.session().clear();
        info!("logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }
}
