//! Common types used by both client and server

use serde::{Deserialize, Serialize};
use std::fmt;

/// Login form payload, posted to `authenticate`
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Keep the token in local storage instead of session storage
    #[serde(default)]
    pub remember_me: bool,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>, remember_me: bool) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            remember_me,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Body returned by a successful `authenticate`
///
/// `id_token` is optional so a 2xx without it can be told apart from a
/// malformed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AuthenticateResponse {
    pub id_token: Option<String>,
}

/// Account of the authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub login: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl Account {
    /// Bare account for a login with the given authorities
    pub fn new(login: impl Into<String>, authorities: Vec<String>) -> Self {
        Self {
            login: login.into(),
            first_name: None,
            last_name: None,
            email: None,
            authorities,
        }
    }
}
