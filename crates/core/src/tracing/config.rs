//! Configuration for tracing and instrumentation

use serde::{Deserialize, Serialize};

/// Main instrumentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentationConfig {
    /// Service name for tracing
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter (e.g., "info", "debug", "coffee_http=trace")
    pub log_level: String,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            service_name: "coffee".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            json: false,
        }
    }
}

impl InstrumentationConfig {
    /// Create configuration from environment variables
    ///
    /// `RUST_LOG` sets the filter and `COFFEE_LOG_JSON=1` switches to JSON output.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            json: std::env::var("COFFEE_LOG_JSON").is_ok_and(|v| v == "1" || v == "true"),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_json_flag() {
        let config: InstrumentationConfig = serde_json::from_value(serde_json::json!({
            "service_name": "coffee-server",
            "service_version": "0.1.0",
            "log_level": "warn",
        }))
        .unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(!config.json);
    }
}
