//! Configuration loading and management
//!
//! Configuration comes from a YAML file (path in `TROCA_CONFIG`, default
//! `config/troca-comigo.yaml`) and a handful of environment overrides.
//! A missing file is not an error: every section has defaults suitable
//! for local development.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/troca-comigo.yaml";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix for every resource route
    pub base_path: String,
    /// Send permissive CORS headers
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            base_path: "/api/v1".to_string(),
            cors: true,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which storage backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::Memory,
            url: None,
            max_connections: 10,
        }
    }
}

/// JWT settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for HS256
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: "troca-comigo-dev-secret-change-me".to_string(),
            issuer: "troca-comigo".to_string(),
            audience: "troca-comigo-api".to_string(),
            token_ttl_secs: 7200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Load from the file named by `TROCA_CONFIG`, apply environment
    /// overrides and validate
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("TROCA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = if Path::new(&path).exists() {
            tracing::info!("Loading configuration from {}", path);
            Self::from_yaml_file(&path)?
        } else {
            tracing::info!("No configuration file at {}, using defaults", path);
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TROCA_HOST`, `TROCA_PORT`, `DATABASE_URL` and `JWT_SECRET`
    ///
    /// `lookup` abstracts the environment so tests can pass a map.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("TROCA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TROCA_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "TROCA_PORT".to_string(),
                message: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
            self.database.backend = DatabaseBackend::Postgres;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.secret = secret;
        }
        Ok(())
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "must be greater than 0"));
        }
        if !self.server.base_path.starts_with('/') {
            return Err(invalid("server.base_path", "must start with '/'"));
        }
        if self.auth.secret.trim().is_empty() {
            return Err(invalid("auth.secret", "must not be empty"));
        }
        if self.auth.token_ttl_secs <= 0 {
            return Err(invalid("auth.token_ttl_secs", "must be positive"));
        }
        if self.pagination.default_limit == 0
            || self.pagination.default_limit > self.pagination.max_limit
        {
            return Err(invalid(
                "pagination.default_limit",
                "must be between 1 and pagination.max_limit",
            ));
        }
        if self.database.backend == DatabaseBackend::Postgres && self.database.url.is_none() {
            return Err(invalid(
                "database.url",
                "is required for the postgres backend",
            ));
        }
        Ok(())
    }

    /// Base path without a trailing slash ("" when mounted at the root)
    pub fn api_prefix(&self) -> &str {
        self.server.base_path.trim_end_matches('/')
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
