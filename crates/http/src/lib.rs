//! Coffee HTTP layer
//!
//! Wire types shared by both sides, plus two feature-gated halves:
//! - `server`: axum routes, JWT token provider, user details and the bearer
//!   auth middleware
//! - `client`: typed reqwest client with interceptors and the services the
//!   frontend calls

#[cfg(feature = "server")]
#[macro_use]
extern crate tracing;

pub mod error;
pub mod types;

#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod state;

#[cfg(feature = "client")]
pub mod client;

pub use error::{ErrorResponse, HttpError, Result};

#[cfg(feature = "server")]
pub use state::AppState;

// Re-export commonly used types
#[cfg(feature = "server")]
pub use axum::{Json, extract, response};
#[cfg(feature = "server")]
pub use utoipa::OpenApi;
