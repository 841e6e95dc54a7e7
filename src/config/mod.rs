//! Configuration management
//!
//! Configuration is loaded from config.yml with environment variables
//! (`MINIPOST_*`) overriding file settings. Missing optional values are
//! filled with sensible defaults, and a missing file yields the defaults
//! outright.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session store configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin (credentialed cookie auth needs an exact origin)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Database configuration (SQLite)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database path or sqlite: URL; `:memory:` is supported
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/minipost.db".to_string()
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session store driver (memory or redis)
    #[serde(default)]
    pub driver: SessionDriver,
    /// Redis connection URL (required when driver is redis)
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Session lifetime in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Cookie domain, set in production when the frontend lives on a
    /// sibling domain
    #[serde(default)]
    pub cookie_domain: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            driver: SessionDriver::default(),
            redis_url: None,
            ttl_minutes: default_ttl_minutes(),
            cookie_name: default_cookie_name(),
            cookie_domain: None,
        }
    }
}

fn default_ttl_minutes() -> u64 {
    90
}

fn default_cookie_name() -> String {
    "_minipost_session".to_string()
}

/// Session store driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionDriver {
    /// In-process store (default)
    #[default]
    Memory,
    /// Redis-backed store
    Redis,
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist or is empty, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with the
    /// offending location.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Recognized variables:
    /// - MINIPOST_SERVER_HOST
    /// - MINIPOST_SERVER_PORT
    /// - MINIPOST_SERVER_CORS_ORIGIN
    /// - MINIPOST_DATABASE_URL
    /// - MINIPOST_SESSION_DRIVER
    /// - MINIPOST_SESSION_REDIS_URL
    /// - MINIPOST_SESSION_TTL_MINUTES
    /// - MINIPOST_SESSION_COOKIE_NAME
    /// - MINIPOST_SESSION_COOKIE_DOMAIN
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("MINIPOST_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("MINIPOST_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("MINIPOST_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(url) = std::env::var("MINIPOST_DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(driver) = std::env::var("MINIPOST_SESSION_DRIVER") {
            match driver.to_lowercase().as_str() {
                "memory" => self.session.driver = SessionDriver::Memory,
                "redis" => self.session.driver = SessionDriver::Redis,
                _ => {} // Ignore invalid values
            }
        }
        if let Ok(redis_url) = std::env::var("MINIPOST_SESSION_REDIS_URL") {
            self.session.redis_url = Some(redis_url);
        }
        if let Ok(ttl) = std::env::var("MINIPOST_SESSION_TTL_MINUTES") {
            if let Ok(ttl) = ttl.parse::<u64>() {
                self.session.ttl_minutes = ttl;
            }
        }
        if let Ok(name) = std::env::var("MINIPOST_SESSION_COOKIE_NAME") {
            self.session.cookie_name = name;
        }
        if let Ok(domain) = std::env::var("MINIPOST_SESSION_COOKIE_DOMAIN") {
            self.session.cookie_domain = Some(domain);
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = Config::load(std::path::Path::new("does/not/exist.yml"))
            .expect("Missing file should yield defaults");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "data/minipost.db");
        assert_eq!(config.session.driver, SessionDriver::Memory);
        assert_eq!(config.session.ttl_minutes, 90);
        assert_eq!(config.session.cookie_name, "_minipost_session");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 3001").unwrap();

        let config = Config::load(file.path()).expect("Failed to load config");
        assert_eq!(config.server.port, 3001);
        // Unspecified sections keep their defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.session.ttl_minutes, 90);
    }

    #[test]
    fn test_load_empty_file_yields_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::load(file.path()).expect("Empty file should yield defaults");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_invalid_yaml_reports_location() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: [not a port").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_session_config_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "session:\n  driver: redis\n  redis_url: redis://127.0.0.1:6379/0\n  ttl_minutes: 30"
        )
        .unwrap();

        let config = Config::load(file.path()).expect("Failed to load config");
        assert_eq!(config.session.driver, SessionDriver::Redis);
        assert_eq!(
            config.session.redis_url.as_deref(),
            Some("redis://127.0.0.1:6379/0")
        );
        assert_eq!(config.session.ttl_minutes, 30);
    }

    #[test]
    fn test_env_overrides() {
        // Env vars are process-global; run the override logic directly to
        // avoid interfering with parallel tests.
        let mut config = Config::default();
        std::env::set_var("MINIPOST_SERVER_PORT", "9999");
        std::env::set_var("MINIPOST_SESSION_DRIVER", "redis");
        config.apply_env_overrides();
        std::env::remove_var("MINIPOST_SERVER_PORT");
        std::env::remove_var("MINIPOST_SESSION_DRIVER");

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.session.driver, SessionDriver::Redis);
    }

    #[test]
    fn test_invalid_env_values_ignored() {
        let mut config = Config::default();
        std::env::set_var("MINIPOST_SESSION_TTL_MINUTES", "not-a-number");
        config.apply_env_overrides();
        std::env::remove_var("MINIPOST_SESSION_TTL_MINUTES");

        assert_eq!(config.session.ttl_minutes, 90);
    }
}
