//! In-memory account store

use crate::error::HttpError;
use crate::types::Account;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Accounts keyed by login
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl AccountStore {
    /// Create a store seeded with the given accounts
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: RwLock::new(
                accounts
                    .into_iter()
                    .map(|account| (account.login.clone(), account))
                    .collect(),
            ),
        }
    }

    /// Account for a login
    pub async fn get(&self, login: &str) -> Result<Account, HttpError> {
        self.accounts
            .read()
            .await
            .get(login)
            .cloned()
            .ok_or_else(|| HttpError::NotFound(format!("No account for login {login}")))
    }

    /// Replace the caller's own account
    ///
    /// The login cannot be changed and authorities are kept from the stored
    /// account, so a user cannot grant themselves roles.
    pub async fn save(&self, caller: &str, account: Account) -> Result<Account, HttpError> {
        if account.login != caller {
            return Err(HttpError::BadRequest(format!(
                "Account login {} does not match the authenticated user",
                account.login
            )));
        }

        let mut accounts = self.accounts.write().await;
        let existing = accounts
            .get(caller)
            .ok_or_else(|| HttpError::NotFound(format!("No account for login {caller}")))?;

        let updated = Account {
            authorities: existing.authorities.clone(),
            ..account
        };
        accounts.insert(caller.to_string(), updated.clone());
        Ok(updated)
    }
}
