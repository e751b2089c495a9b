//! Domain types shared by every crate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key under which the bearer token is kept, in either storage backend
pub const AUTH_TOKEN_KEY: &str = "authenticationToken";

/// Which browser storage area holds the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Survives a browser restart
    Local,
    /// Cleared when the tab is closed
    Session,
}

impl StorageKind {
    /// Storage selected by the "remember me" flag of a login
    pub const fn for_remember_me(remember_me: bool) -> Self {
        if remember_me { Self::Local } else { Self::Session }
    }

    /// Both storage kinds, in lookup order
    pub const ALL: [Self; 2] = [Self::Local, Self::Session];
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Session => f.write_str("session"),
        }
    }
}

/// Opaque bearer credential (a JWT)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JwtToken(String);

impl JwtToken {
    /// Wrap a raw token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw token string
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Value for an `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for JwtToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JwtToken({} chars)", self.0.len())
    }
}

impl fmt::Display for JwtToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JwtToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_me_selects_local_storage() {
        assert_eq!(StorageKind::for_remember_me(true), StorageKind::Local);
        assert_eq!(StorageKind::for_remember_me(false), StorageKind::Session);
    }

    #[test]
    fn token_debug_hides_value() {
        let token = JwtToken::new("eyJhbGciOiJIUzUxMiJ9.payload.sig");
        let debug = format!("{token:?}");
        assert!(!debug.contains("payload"));
        assert_eq!(token.bearer(), "Bearer eyJhbGciOiJIUzUxMiJ9.payload.sig");
    }

    #[test]
    fn token_serializes_as_plain_string() {
        let token = JwtToken::new("abc");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc\"");
    }
}
