use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Login form for the OAuth2 password flow.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default = "Credentials::default_grant_type")]
    pub grant_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            grant_type: Self::default_grant_type(),
            scope: None,
            client_id: None,
            client_secret: None,
        }
    }

    fn default_grant_type() -> String {
        "password".to_owned()
    }

    /// Form fields in the order the login endpoint expects them.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("grant_type".to_owned(), self.grant_type.clone()),
            ("username".to_owned(), self.username.clone()),
            ("password".to_owned(), self.password.clone()),
        ];
        let optional = [
            ("scope", &self.scope),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                fields.push((name.to_owned(), value.clone()));
            }
        }
        fields
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("grant_type", &self.grant_type)
            .field("scope", &self.scope)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Token issued by a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Full login response body.
    pub raw: Value,
}

impl TokenResponse {
    /// Extracts the token from a login response.
    ///
    /// Looks at `access_token`, then `data.access_token`, then `token`.
    /// `token_type` defaults to `bearer`.
    pub fn from_value(raw: Value) -> ClientResult<Self> {
        let access_token = raw
            .get("access_token")
            .and_then(Value::as_str)
            .or_else(|| raw.pointer("/data/access_token").and_then(Value::as_str))
            .or_else(|| raw.get("token").and_then(Value::as_str))
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| ClientError::Auth("no access token in response".to_owned()))?;
        let token_type = raw
            .get("token_type")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or("bearer")
            .to_owned();
        Ok(Self {
            access_token,
            token_type,
            raw,
        })
    }
}
