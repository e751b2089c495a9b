//! Account client methods

use super::{ClientError, CoffeeClient};
use crate::types::Account;
use reqwest::Method;

/// Reads and updates the signed-in user's account
#[derive(Debug, Clone)]
pub struct AccountService {
    client: CoffeeClient,
}

impl AccountService {
    pub fn new(client: CoffeeClient) -> Self {
        Self { client }
    }

    /// Get the current account
    pub async fn get(&self) -> Result<Account, ClientError> {
        let request = self.client.request(Method::GET, "/account");
        self.client.execute(request).await
    }

    /// Save the current account, returning what the server stored
    pub async fn save(&self, account: &Account) -> Result<Account, ClientError> {
        let request = self.client.request(Method::POST, "/account").json(account);
        self.client.execute(request).await
    }
}
