//! Token signing secret management
//!
//! A configured `security.jwt_secret` wins. Otherwise the secret is read from
//! `security.jwt_secret_file`, which is created with a random value on first
//! start so tokens survive restarts.

use crate::config::{MIN_JWT_SECRET_LEN, SecurityConfig};
use anyhow::{Context, Result};
use rand::{Rng, distributions::Alphanumeric};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Generate a 64 character alphanumeric secret
fn generate_jwt_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Secret to sign tokens with
pub async fn resolve_jwt_secret(security: &SecurityConfig) -> Result<String> {
    match &security.jwt_secret {
        Some(secret) => {
            debug!("Using configured JWT secret");
            Ok(secret.clone())
        }
        None => load_or_create_jwt_secret(&security.jwt_secret_file).await,
    }
}

/// Load the secret from `path`, generating and saving one if missing
pub async fn load_or_create_jwt_secret(path: &Path) -> Result<String> {
    if path.exists() {
        debug!("Loading existing JWT secret from: {}", path.display());
        let secret = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read JWT secret from {}", path.display()))?;

        let secret = secret.trim();
        if secret.len() < MIN_JWT_SECRET_LEN {
            anyhow::bail!("JWT secret is too short (minimum {MIN_JWT_SECRET_LEN} characters)");
        }

        return Ok(secret.to_string());
    }

    info!("Generating new JWT secret at: {}", path.display());
    let secret = generate_jwt_secret();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .context("Failed to create directory for JWT secret")?;
    }

    fs::write(path, &secret)
        .await
        .with_context(|| format!("Failed to write JWT secret to {}", path.display()))?;

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .context("Failed to set permissions on JWT secret file")?;
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_jwt_secret() {
        let secret1 = generate_jwt_secret();
        let secret2 = generate_jwt_secret();

        assert_eq!(secret1.len(), 64);
        assert_ne!(secret1, secret2);
        assert!(secret1.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_load_or_create_jwt_secret() {
        let temp_dir = TempDir::new().unwrap();
        let secret_path = temp_dir.path().join("keys").join("jwt_secret");

        let secret1 = load_or_create_jwt_secret(&secret_path).await.unwrap();
        assert_eq!(secret1.len(), 64);
        assert!(secret_path.exists());

        let secret2 = load_or_create_jwt_secret(&secret_path).await.unwrap();
        assert_eq!(secret1, secret2);
    }

    #[tokio::test]
    async fn test_reject_short_secret() {
        let temp_dir = TempDir::new().unwrap();
        let secret_path = temp_dir.path().join("jwt_secret");
        fs::write(&secret_path, "too-short").await.unwrap();

        let result = load_or_create_jwt_secret(&secret_path).await;
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[tokio::test]
    async fn test_configured_secret_wins() {
        let temp_dir = TempDir::new().unwrap();
        let security = SecurityConfig {
            jwt_secret: Some("configured-secret-configured-secret-configured".to_string()),
            jwt_secret_file: temp_dir.path().join("jwt_secret"),
            ..SecurityConfig::default()
        };

        let secret = resolve_jwt_secret(&security).await.unwrap();
        assert!(secret.starts_with("configured-secret"));
        assert!(!security.jwt_secret_file.exists());
    }
}
