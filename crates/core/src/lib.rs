//! Coffee core types and utilities
//!
//! Shared between the server, the HTTP client and the wasm frontend: the
//! session model that owns the bearer token, its storage abstraction and the
//! common error type.

pub mod error;
pub mod session;
pub mod tracing;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use session::{MemoryTokenStorage, SessionContext, TokenStorage};
pub use types::{AUTH_TOKEN_KEY, JwtToken, StorageKind};
