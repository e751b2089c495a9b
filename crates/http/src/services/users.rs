//! User details service
//!
//! Holds the known users with their Argon2 password hashes and checks login
//! attempts against them.

use crate::error::HttpError;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use std::collections::HashMap;

/// A user known to the server
#[derive(Clone)]
pub struct UserRecord {
    pub login: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub authorities: Vec<String>,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("login", &self.login)
            .field("authorities", &self.authorities)
            .finish_non_exhaustive()
    }
}

/// Hash a password into an Argon2 PHC string
pub fn hash_password(password: &str) -> Result<String, HttpError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HttpError::InternalServerError(format!("Failed to hash password: {e}")))
}

/// Check a password against an Argon2 PHC string
///
/// An unparsable hash never matches.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is not a valid PHC string: {e}");
            false
        }
    }
}

/// Lookup and verification of users by login
#[derive(Debug, Default)]
pub struct UserDetailsService {
    users: HashMap<String, UserRecord>,
}

impl UserDetailsService {
    /// Create the service from a set of users; later duplicates win
    pub fn new(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.login.clone(), user))
                .collect(),
        }
    }

    /// Load a user by login
    pub fn load_user_by_username(&self, login: &str) -> Result<&UserRecord, HttpError> {
        self.users
            .get(login)
            .ok_or_else(|| HttpError::NotFound(format!("User with login {login} unknown")))
    }

    /// Verify a login attempt
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub fn authenticate(&self, login: &str, password: &str) -> Result<&UserRecord, HttpError> {
        let bad_credentials = || HttpError::AuthenticationFailed("Bad credentials".to_string());

        let user = self.load_user_by_username(login).map_err(|e| {
            debug!("{e}");
            bad_credentials()
        })?;

        if verify_password(password, &user.password_hash) {
            Ok(user)
        } else {
            debug!(login = %login, "Password mismatch");
            Err(bad_credentials())
        }
    }

    /// All known users
    pub fn users(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values()
    }
}
