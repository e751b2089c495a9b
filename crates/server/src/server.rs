//! Server assembly: state, router and middleware stack

use crate::config::{ServerConfig, Settings, UserConfig};
use crate::jwt_secret::resolve_jwt_secret;
use anyhow::{Context, Result};
use axum::http::{HeaderName, StatusCode, header};
use coffee_http::{
    AppState,
    routes,
    services::{AccountStore, JwtConfig, TokenProvider, UserDetailsService, UserRecord, hash_password},
    types::Account,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{debug, info, warn};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

/// Builds the application from settings
pub struct ServerBuilder {
    settings: Settings,
}

impl ServerBuilder {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Turn configured users into records with password hashes
    pub fn build_users(users: &[UserConfig]) -> Result<Vec<UserRecord>> {
        users
            .iter()
            .map(|user| -> Result<UserRecord> {
                let password_hash = match (&user.password_hash, &user.password) {
                    (Some(hash), _) => hash.clone(),
                    (None, Some(password)) => {
                        warn!(
                            login = %user.login,
                            "User configured with a plaintext password, prefer password_hash"
                        );
                        hash_password(password)
                            .with_context(|| format!("Failed to hash password of {}", user.login))?
                    }
                    (None, None) => anyhow::bail!("User {} has no password", user.login),
                };

                Ok(UserRecord {
                    login: user.login.clone(),
                    password_hash,
                    authorities: user.authorities.clone(),
                })
            })
            .collect()
    }

    fn build_accounts(users: &[UserConfig]) -> AccountStore {
        AccountStore::new(users.iter().map(|user| Account {
            login: user.login.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            authorities: user.authorities.clone(),
        }))
    }

    /// Create the shared application state
    pub async fn build_app_state(&self) -> Result<AppState> {
        let security = &self.settings.security;
        let secret = resolve_jwt_secret(security).await?;

        let token_provider = TokenProvider::new(JwtConfig::new(
            secret,
            security.token_validity_seconds,
            security.token_validity_seconds_for_remember_me,
        ));

        let users = Self::build_users(&self.settings.users)?;
        info!(users = users.len(), "Loaded users");

        Ok(AppState::new(
            Arc::new(token_provider),
            Arc::new(UserDetailsService::new(users)),
            Arc::new(Self::build_accounts(&self.settings.users)),
        )
        .with_coffee_specialties(self.settings.coffee.specialties.clone()))
    }

    /// API routes with their OpenAPI description
    pub fn build_router() -> OpenApiRouter<AppState> {
        routes::router()
    }

    /// Assemble docs, static files and auth into a plain axum router
    pub fn build_axum_router(
        router: OpenApiRouter<AppState>,
        state: AppState,
        static_dir: Option<&str>,
    ) -> axum::Router {
        let (router, api) = router.split_for_parts();

        let mut router = router.merge(Scalar::with_url("/docs/", api));

        if let Some(static_dir) = static_dir {
            let static_path = Path::new(static_dir);
            if static_path.exists() {
                info!("Serving static files from: {}", static_dir);

                let index_path = static_path.join("index.html");
                debug!("Index file exists: {}", index_path.exists());

                router = if index_path.exists() {
                    router.fallback_service(
                        // Client side routes get index.html with 200
                        ServeDir::new(static_dir).fallback(ServeFile::new(index_path)),
                    )
                } else {
                    router.fallback_service(ServeDir::new(static_dir))
                };
            } else {
                warn!(
                    "Static directory '{}' does not exist, skipping static file serving",
                    static_dir
                );
            }
        }

        routes::with_auth(router, state)
    }

    /// Outer middleware: tracing, timeout and optional CORS
    pub fn apply_layers(router: axum::Router, config: &ServerConfig) -> axum::Router {
        let router = router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeout_secs),
            ))
            .layer(TraceLayer::new_for_http());

        if config.cors_enabled {
            router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
                    .expose_headers(vec![HeaderName::from_static("authorization")]),
            )
        } else {
            router
        }
    }

    /// Full application for these settings
    pub async fn build(&self) -> Result<axum::Router> {
        let state = self.build_app_state().await?;
        let router = Self::build_axum_router(
            Self::build_router(),
            state,
            self.settings.server.static_dir.as_deref(),
        );
        Ok(Self::apply_layers(router, &self.settings.server))
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let app = self.build().await?;
        let addr = self.settings.server.bind_addr()?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!("HTTP server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")
    }
}
