//! Client-side session storage.

use std::sync::Arc;

use dashmap::DashMap;
use rosterbox_core::TokenResponse;
use serde_json::Value;
use smol_str::SmolStr;

/// Key holding the access token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the token type reported by the login endpoint.
pub const TOKEN_TYPE_KEY: &str = "token_type";
/// Key holding the raw login response.
pub const AUTH_KEY: &str = "auth";

/// Key/value session storage shared by the client and its transport.
///
/// Written on login, read on every authenticated request and cleared on
/// logout. Cloning is cheap and the clones share state.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    values: Arc<DashMap<SmolStr, Value>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).map(|value| value.clone())
    }

    pub fn set(&self, key: impl Into<SmolStr>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.remove(key).map(|(_, value)| value)
    }

    /// Stores a login result under the fixed session keys.
    pub fn store_token(&self, token: &TokenResponse) {
        self.set(TOKEN_KEY, Value::String(token.access_token.clone()));
        self.set(TOKEN_TYPE_KEY, Value::String(token.token_type.clone()));
        self.set(AUTH_KEY, token.raw.clone());
    }

    /// Returns the stored access token.
    pub fn token(&self) -> Option<String> {
        self.values
            .get(TOKEN_KEY)
            .and_then(|value| value.as_str().map(str::to_owned))
            .filter(|token| !token.is_empty())
    }

    pub fn token_type(&self) -> Option<String> {
        self.values
            .get(TOKEN_TYPE_KEY)
            .and_then(|value| value.as_str().map(str::to_owned))
    }

    /// Returns the `Authorization` header value for the stored token.
    pub fn authorization(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {token}"))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Removes every stored value.
    pub fn clear(&self) {
        self.values.clear();
    }
}
