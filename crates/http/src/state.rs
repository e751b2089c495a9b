//! Application state management

use crate::services::{AccountStore, TokenProvider, UserDetailsService};
use std::sync::Arc;

/// Shared application state
///
/// Cloned into every handler and into the auth middleware.
#[derive(Clone)]
pub struct AppState {
    /// Issues and validates bearer tokens
    pub token_provider: Arc<TokenProvider>,
    /// Known users and their password hashes
    pub user_details: Arc<UserDetailsService>,
    /// Mutable account profiles
    pub accounts: Arc<AccountStore>,
    /// Specialties served by `GET /api/coffee-specialties`
    pub coffee_specialties: Arc<Vec<String>>,
}

impl AppState {
    /// Create a new AppState with the given components
    pub fn new(
        token_provider: Arc<TokenProvider>,
        user_details: Arc<UserDetailsService>,
        accounts: Arc<AccountStore>,
    ) -> Self {
        Self {
            token_provider,
            user_details,
            accounts,
            coffee_specialties: Arc::new(default_coffee_specialties()),
        }
    }

    /// Replace the served specialties
    pub fn with_coffee_specialties(mut self, specialties: Vec<String>) -> Self {
        self.coffee_specialties = Arc::new(specialties);
        self
    }
}

/// Specialties served when none are configured
pub fn default_coffee_specialties() -> Vec<String> {
    vec!["Espresso".to_string(), "Cappuccino".to_string()]
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        use crate::services::{JwtConfig, UserRecord, hash_password};
        use crate::types::Account;

        let authorities = vec!["ROLE_USER".to_string()];
        let joe = UserRecord {
            login: "joe".to_string(),
            password_hash: hash_password("joe").expect("hashing test password"),
            authorities: authorities.clone(),
        };

        Self::new(
            Arc::new(TokenProvider::new(JwtConfig::new(
                "test-secret-test-secret-test-secret-test-secret-test-secret-0000".to_string(),
                3600,
                86_400,
            ))),
            Arc::new(UserDetailsService::new([joe])),
            Arc::new(AccountStore::new([Account::new("joe", authorities)])),
        )
    }
}
