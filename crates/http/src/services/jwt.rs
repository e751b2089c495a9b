//! JWT token provider
//!
//! Issues and validates HS512 tokens carrying the user's login and a
//! comma-joined authority list. Tokens issued with "remember me" get a
//! longer validity.

use crate::error::HttpError;
use crate::middleware::auth::AuthenticatedUser;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Claim holding the comma-joined authorities
pub const AUTHORITIES_KEY: &str = "auth";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user login)
    pub sub: String,
    /// Comma-joined authorities, empty when the user has none
    #[serde(rename = "auth", default)]
    pub authorities: String,
    /// Expiration time (as UTC timestamp)
    pub exp: i64,
    /// Issued at (as UTC timestamp)
    pub iat: i64,
}

impl Claims {
    /// Authorities as a list, skipping empty entries
    pub fn authority_list(&self) -> Vec<String> {
        self.authorities
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// Token provider configuration
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Validity of a regular token
    pub token_validity: Duration,
    /// Validity of a token issued with "remember me"
    pub token_validity_for_remember_me: Duration,
}

impl JwtConfig {
    /// Create a configuration from validities expressed in seconds
    pub fn new(secret: String, validity_secs: i64, remember_me_validity_secs: i64) -> Self {
        Self {
            secret,
            token_validity: Duration::seconds(validity_secs),
            token_validity_for_remember_me: Duration::seconds(remember_me_validity_secs),
        }
    }
}

/// JWT service for token operations
pub struct TokenProvider {
    config: Arc<JwtConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenProvider {
    /// Create a new token provider
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config: Arc::new(config),
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a login
    pub fn create_token(
        &self,
        login: &str,
        authorities: &[String],
        remember_me: bool,
    ) -> Result<String, HttpError> {
        let now = Utc::now();
        let validity = if remember_me {
            self.config.token_validity_for_remember_me
        } else {
            self.config.token_validity
        };

        let claims = Claims {
            sub: login.to_string(),
            authorities: authorities.join(","),
            exp: (now + validity).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| HttpError::InternalServerError(format!("Failed to generate token: {e}")))
    }

    /// Validate a token and extract its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, HttpError> {
        let validation = Validation::new(Algorithm::HS512);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "Expired JWT token",
                    ErrorKind::InvalidSignature => "Invalid JWT signature",
                    ErrorKind::InvalidAlgorithm => "Unsupported JWT token",
                    ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) => {
                        "Malformed JWT token"
                    }
                    _ => "Invalid JWT token",
                };
                info!("{reason}");
                trace!("{reason}: {e}");
                HttpError::AuthenticationFailed(reason.to_string())
            })
    }

    /// Validate a token and build the authenticated user from it
    pub fn authentication(&self, token: &str) -> Result<AuthenticatedUser, HttpError> {
        let claims = self.validate_token(token)?;
        Ok(AuthenticatedUser {
            authorities: claims.authority_list(),
            login: claims.sub,
            expires_at: claims.exp,
        })
    }

    /// Extract token from Authorization header
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, HttpError> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                HttpError::AuthenticationFailed("Invalid authorization header format".to_string())
            })
    }

    /// Validity applied for the given "remember me" flag
    pub fn validity(&self, remember_me: bool) -> Duration {
        if remember_me {
            self.config.token_validity_for_remember_me
        } else {
            self.config.token_validity
        }
    }
}
