//! Request and response interceptors
//!
//! Every request built by [`CoffeeClient`](super::CoffeeClient) passes through
//! each interceptor's [`Interceptor::on_request`], and every response status
//! is reported to [`Interceptor::on_response`], in registration order.

use super::auth::AUTHENTICATE_ENDPOINT;
use coffee_core::SessionContext;
use reqwest::{RequestBuilder, StatusCode, Url, header};
use std::fmt;
use std::sync::Arc;

/// Hook invoked when the server rejects the session
pub type AuthExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Middleware applied by the client around each call
pub trait Interceptor: Send + Sync {
    /// Adjust an outgoing request
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }

    /// Observe the status of a received response for `url`
    fn on_response(&self, _url: &Url, _status: StatusCode) {}
}

/// Attaches `Authorization: Bearer <token>` when a token is stored
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    session: SessionContext,
}

impl AuthInterceptor {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }
}

impl Interceptor for AuthInterceptor {
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header(header::AUTHORIZATION, token.bearer()),
            None => request,
        }
    }
}

/// Clears the session when a response comes back `401 Unauthorized`
///
/// A rejected login is not an expired session and leaves the hook alone.
#[derive(Clone)]
pub struct AuthExpiredInterceptor {
    session: SessionContext,
    on_expired: Option<AuthExpiredHook>,
}

impl AuthExpiredInterceptor {
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            on_expired: None,
        }
    }

    /// Run `hook` after the session has been cleared
    pub fn with_hook(mut self, hook: AuthExpiredHook) -> Self {
        self.on_expired = Some(hook);
        self
    }
}

impl fmt::Debug for AuthExpiredInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthExpiredInterceptor")
            .field("session", &self.session)
            .field("has_hook", &self.on_expired.is_some())
            .finish()
    }
}

impl Interceptor for AuthExpiredInterceptor {
    fn on_response(&self, url: &Url, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED || url.path().ends_with(AUTHENTICATE_ENDPOINT) {
            return;
        }

        tracing::info!("Server rejected the session, clearing stored token");
        self.session.clear();
        if let Some(hook) = &self.on_expired {
            hook();
        }
    }
}
