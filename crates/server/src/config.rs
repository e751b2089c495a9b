//! Configuration for the coffee server
//!
//! Sources are layered: built-in defaults, then an optional TOML file, then
//! `COFFEE__`-prefixed environment variables (`COFFEE__SERVER__PORT=9000`).

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Config files probed by [`Settings::load`], in order
const CONFIG_PATHS: [&str; 3] = ["coffee.toml", "config/coffee.toml", "/etc/coffee/coffee.toml"];

/// Minimum length of an HS512 signing secret
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    /// Users allowed to log in
    #[serde(default = "default_users")]
    pub users: Vec<UserConfig>,
    #[serde(default)]
    pub coffee: CoffeeConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow cross-origin requests from any origin
    #[serde(default)]
    pub cors_enabled: bool,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory holding the compiled frontend
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Log filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// HS512 secret; when absent one is loaded from or written to `jwt_secret_file`
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_jwt_secret_file")]
    pub jwt_secret_file: PathBuf,
    #[serde(default = "default_token_validity")]
    pub token_validity_seconds: i64,
    #[serde(default = "default_token_validity_for_remember_me")]
    pub token_validity_seconds_for_remember_me: i64,
}

/// A user allowed to log in
///
/// Exactly one of `password` and `password_hash` must be set. Plaintext
/// passwords are hashed at startup.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub login: String,
    #[serde(default)]
    pub password: Option<String>,
    /// Argon2 PHC string
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default = "default_authorities")]
    pub authorities: Vec<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl std::fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserConfig")
            .field("login", &self.login)
            .field("authorities", &self.authorities)
            .finish_non_exhaustive()
    }
}

/// Content served by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoffeeConfig {
    #[serde(default = "default_specialties")]
    pub specialties: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_jwt_secret_file() -> PathBuf {
    PathBuf::from("data/jwt_secret")
}

const fn default_token_validity() -> i64 {
    86_400
}

const fn default_token_validity_for_remember_me() -> i64 {
    2_592_000
}

fn default_authorities() -> Vec<String> {
    vec!["ROLE_USER".to_string()]
}

fn default_users() -> Vec<UserConfig> {
    vec![UserConfig {
        login: "joe".to_string(),
        password: Some("joe".to_string()),
        password_hash: None,
        authorities: default_authorities(),
        first_name: None,
        last_name: None,
        email: None,
    }]
}

fn default_specialties() -> Vec<String> {
    coffee_http::state::default_coffee_specialties()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: false,
            timeout_secs: default_timeout_secs(),
            static_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_secret_file: default_jwt_secret_file(),
            token_validity_seconds: default_token_validity(),
            token_validity_seconds_for_remember_me: default_token_validity_for_remember_me(),
        }
    }
}

impl Default for CoffeeConfig {
    fn default() -> Self {
        Self {
            specialties: default_specialties(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            security: SecurityConfig::default(),
            users: default_users(),
            coffee: CoffeeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Message(format!("server.host/port is not an address: {e}")))
    }
}

impl Settings {
    /// Load configuration from the default file locations and environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        for path in CONFIG_PATHS {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path).required(false));
            }
        }

        let settings: Self = builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a specific config file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name(path))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn environment() -> Environment {
        Environment::with_prefix("COFFEE")
            .separator("__")
            .try_parsing(true)
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.bind_addr()?;

        if self
            .security
            .jwt_secret
            .as_ref()
            .is_some_and(|secret| secret.len() < MIN_JWT_SECRET_LEN)
        {
            return Err(ConfigError::Message(format!(
                "security.jwt_secret must be at least {MIN_JWT_SECRET_LEN} bytes"
            )));
        }

        if self.security.token_validity_seconds <= 0
            || self.security.token_validity_seconds_for_remember_me <= 0
        {
            return Err(ConfigError::Message(
                "security token validities must be positive".to_string(),
            ));
        }

        for user in &self.users {
            if user.login.trim().is_empty() {
                return Err(ConfigError::Message("users[].login cannot be empty".to_string()));
            }
            if user.password.is_some() == user.password_hash.is_some() {
                return Err(ConfigError::Message(format!(
                    "user {} needs exactly one of password or password_hash",
                    user.login
                )));
            }
        }

        Ok(())
    }
}
