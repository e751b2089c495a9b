//! Coffee specialties server
//!
//! Serves the JSON API under `/api`, the OpenAPI docs under `/docs/` and,
//! when configured, the compiled single-page app as a static fallback.

pub mod config;
pub mod jwt_secret;
pub mod server;

pub use config::Settings;
pub use server::ServerBuilder;
