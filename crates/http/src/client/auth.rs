//! Login and logout against the authenticate endpoint

use super::{ClientError, CoffeeClient};
use crate::types::{AuthenticateResponse, Credentials};
use coffee_core::{JwtToken, SessionContext};
use reqwest::Method;
use tracing::{debug, info, warn};

/// Login endpoint below the API base URL
pub const AUTHENTICATE_ENDPOINT: &str = "/authenticate";

/// Talks to `authenticate` and keeps the resulting token in the session
#[derive(Debug, Clone)]
pub struct AuthServerProvider {
    client: CoffeeClient,
    session: SessionContext,
}

impl AuthServerProvider {
    pub fn new(client: CoffeeClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    /// Current token, local storage first
    pub fn get_token(&self) -> Option<JwtToken> {
        self.session.token()
    }

    /// Post the credentials and store the returned `id_token`
    ///
    /// The token lands in local storage when `remember_me` is set, otherwise
    /// in session storage.
    pub async fn login(&self, credentials: &Credentials) -> Result<JwtToken, ClientError> {
        debug!(login = %credentials.username, "Authenticating");
        let request = self
            .client
            .request(Method::POST, AUTHENTICATE_ENDPOINT)
            .json(credentials);
        let response: AuthenticateResponse = self.client.execute(request).await?;

        let token = response
            .id_token
            .filter(|token| !token.is_empty())
            .map(JwtToken::new)
            .ok_or(ClientError::MissingToken)?;

        self.store_authentication_token(&token, credentials.remember_me)?;
        Ok(token)
    }

    pub fn store_authentication_token(
        &self,
        token: &JwtToken,
        remember_me: bool,
    ) -> Result<(), ClientError> {
        Ok(self.session.store_token(token, remember_me)?)
    }

    /// Drop the token from both storage areas
    pub fn logout(&self) {
        self.session.clear();
    }
}

/// Login entry point used by the login form
#[derive(Debug, Clone)]
pub struct LoginService {
    auth_server_provider: AuthServerProvider,
}

impl LoginService {
    pub fn new(auth_server_provider: AuthServerProvider) -> Self {
        Self {
            auth_server_provider,
        }
    }

    /// Log in; any failure leaves no token behind
    pub async fn login(&self, credentials: &Credentials) -> Result<JwtToken, ClientError> {
        match self.auth_server_provider.login(credentials).await {
            Ok(token) => {
                info!(login = %credentials.username, "Logged in");
                Ok(token)
            }
            Err(e) => {
                warn!(login = %credentials.username, "Login failed: {e}");
                self.logout();
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        self.auth_server_provider.logout();
    }
}
