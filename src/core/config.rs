//! Configuration management for the tool hub server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::tools::definitions::pomodoro::DEFAULT_DURATION_MINUTES;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tool defaults.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Defaults applied by tool handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Session length for a pomodoro start that omits `duration`.
    pub pomodoro_default_minutes: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            pomodoro_default_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "toolhub-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `TOOLHUB_`.
    /// For example: `TOOLHUB_SERVER_NAME`, `TOOLHUB_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("TOOLHUB_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("TOOLHUB_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(flag) = std::env::var("TOOLHUB_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = flag.to_lowercase() != "false" && flag != "0";
        }

        if let Ok(minutes) = std::env::var("TOOLHUB_POMODORO_MINUTES") {
            match minutes.parse::<f64>() {
                Ok(m) => {
                    config.tools.pomodoro_default_minutes = m;
                    info!("Pomodoro default duration set to {} minutes", m);
                }
                Err(_) => warn!(
                    "Ignoring TOOLHUB_POMODORO_MINUTES={:?}: not a number (using {})",
                    minutes, config.tools.pomodoro_default_minutes
                ),
            }
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }

    /// Check values that cannot be expressed in the types.
    pub fn validate(&self) -> Result<()> {
        let minutes = self.tools.pomodoro_default_minutes;
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(Error::config(format!(
                "pomodoro_default_minutes must be a positive number, got {}",
                minutes
            )));
        }

        if self.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }

        self.transport.validate().map_err(Error::config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_pomodoro_minutes_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOLHUB_POMODORO_MINUTES", "45");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.pomodoro_default_minutes, 45.0);
        unsafe {
            std::env::remove_var("TOOLHUB_POMODORO_MINUTES");
        }
    }

    #[test]
    fn test_pomodoro_minutes_invalid_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOLHUB_POMODORO_MINUTES", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.pomodoro_default_minutes, 25.0);
        unsafe {
            std::env::remove_var("TOOLHUB_POMODORO_MINUTES");
        }
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOLHUB_SERVER_NAME", "campus-tools");
        }
        let config = Config::from_env();
        assert_eq!(config.server.name, "campus-tools");
        unsafe {
            std::env::remove_var("TOOLHUB_SERVER_NAME");
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_pomodoro_default() {
        let mut config = Config::default();
        config.tools.pomodoro_default_minutes = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.tools.pomodoro_default_minutes = f64::NAN;
        assert!(config.validate().is_err());
    }
}
