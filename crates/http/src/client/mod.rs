//! Coffee HTTP client

pub mod account;
pub mod auth;
pub mod error;
pub mod interceptor;
pub mod specialties;

pub use account::AccountService;
pub use auth::{AuthServerProvider, LoginService};
pub use error::ClientError;
pub use interceptor::{AuthExpiredHook, AuthExpiredInterceptor, AuthInterceptor, Interceptor};
pub use specialties::{CoffeeSpecialtiesService, display_specialties};

use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Coffee API client
///
/// Cheap to clone; clones share the connection pool and the interceptors.
#[derive(Clone)]
pub struct CoffeeClient {
    client: Client,
    base_url: String,
    interceptors: Arc<[Arc<dyn Interceptor>]>,
}

impl CoffeeClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> CoffeeClientBuilder {
        CoffeeClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request for a path below the base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_url(method, &format!("{}{}", self.base_url, path))
    }

    /// Create a request for an absolute URL
    pub fn request_url(&self, method: Method, url: &str) -> RequestBuilder {
        self.interceptors
            .iter()
            .fold(self.client.request(method, url), |request, interceptor| {
                interceptor.on_request(request)
            })
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        for interceptor in self.interceptors.iter() {
            interceptor.on_response(response.url(), status);
        }

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}

impl std::fmt::Debug for CoffeeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoffeeClient")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

/// Builder for CoffeeClient
#[derive(Default)]
pub struct CoffeeClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl CoffeeClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Append an interceptor
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CoffeeClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        #[cfg(target_arch = "wasm32")]
        let _ = self.timeout; // Timeouts not supported on WASM

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| "coffee-client/0.1.0".to_string()),
        );

        let client = client_builder.build()?;

        Ok(CoffeeClient {
            client,
            base_url,
            interceptors: self.interceptors.into(),
        })
    }
}
