//! Server-side services

pub mod accounts;
pub mod jwt;
pub mod users;

pub use accounts::AccountStore;
pub use jwt::{Claims, JwtConfig, TokenProvider};
pub use users::{UserDetailsService, UserRecord, hash_password, verify_password};
