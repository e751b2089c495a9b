//! Bearer token authentication middleware
//!
//! Every `/api/**` path requires a valid token except `/api/authenticate`.
//! Preflight `OPTIONS` requests always pass.

use crate::error::HttpError;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{Method, header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

/// Path of the login endpoint, reachable without a token
pub const AUTHENTICATE_PATH: &str = "/api/authenticate";

/// Identity established from a bearer token
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub login: String,
    pub authorities: Vec<String>,
    /// Token expiry as UTC timestamp
    pub expires_at: i64,
}

/// Trait for authentication providers
pub trait AuthProvider: Send + Sync {
    /// Authenticate a request and return identity if successful
    fn authenticate(&self, parts: &Parts) -> Result<AuthenticatedUser, HttpError>;

    /// Check if authentication should be skipped for a given path
    fn should_skip_auth(&self, path: &str) -> bool {
        !path.starts_with("/api/") || path == AUTHENTICATE_PATH
    }
}

impl AuthProvider for AppState {
    fn authenticate(&self, parts: &Parts) -> Result<AuthenticatedUser, HttpError> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                HttpError::AuthenticationFailed("Missing authorization header".to_string())
            })?;

        let token = self.token_provider.extract_bearer_token(auth_header)?;
        self.token_provider.authentication(token)
    }
}

/// Middleware function for authentication
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    if req.method() == Method::OPTIONS || app_state.should_skip_auth(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    match app_state.authenticate(&parts) {
        Ok(user) => {
            debug!(login = %user.login, path = %parts.uri.path(), "Request authenticated");
            parts.extensions.insert(user);
            Ok(next.run(Request::from_parts(parts, body)).await)
        }
        Err(e) => {
            debug!(path = %parts.uri.path(), "Rejected request: {e}");
            Err(e)
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| HttpError::AuthenticationFailed("User not authenticated".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_api_paths_require_auth() {
        let state = AppState::default();
        assert!(state.should_skip_auth("/health"));
        assert!(state.should_skip_auth("/"));
        assert!(state.should_skip_auth("/index.html"));
        assert!(state.should_skip_auth("/docs/"));
        assert!(state.should_skip_auth(AUTHENTICATE_PATH));
        assert!(!state.should_skip_auth("/api/coffee-specialties"));
        assert!(!state.should_skip_auth("/api/account"));
    }

    #[test]
    fn missing_header_is_rejected() {
        let state = AppState::default();
        let (parts, ()) = axum::http::Request::builder()
            .uri("/api/account")
            .body(())
            .unwrap()
            .into_parts();

        assert!(matches!(
            state.authenticate(&parts),
            Err(HttpError::AuthenticationFailed(_))
        ));
    }

    #[test]
    fn valid_bearer_token_is_accepted() {
        let state = AppState::default();
        let token = state
            .token_provider
            .create_token("joe", &["ROLE_USER".to_string()], false)
            .unwrap();
        let (parts, ()) = axum::http::Request::builder()
            .uri("/api/account")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts();

        let user = state.authenticate(&parts).unwrap();
        assert_eq!(user.login, "joe");
    }
}
