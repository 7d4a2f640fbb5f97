//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Admin authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Pinning service configuration.
    #[serde(default)]
    pub pinning: PinningConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Admin authentication configuration.
///
/// Both secrets are optional at load time: a missing value degrades to a
/// configuration error when login is attempted, not a startup crash.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Admin password for back-office login.
    #[serde(default)]
    pub admin_password: Option<String>,
    /// Secret used to sign session tokens.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Session validity window in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_password: None,
            jwt_secret: None,
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

/// Pinning service (content-addressed image store) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PinningConfig {
    /// API key for the pinning service.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Secret API key for the pinning service.
    #[serde(default)]
    pub secret_api_key: Option<String>,
    /// Base URL of the pinning API.
    #[serde(default = "default_pinning_api_url")]
    pub api_url: String,
    /// Gateway base URL used to build retrieval URLs from content hashes.
    #[serde(default = "default_pinning_gateway_url")]
    pub gateway_url: String,
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            secret_api_key: None,
            api_url: default_pinning_api_url(),
            gateway_url: default_pinning_gateway_url(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_session_ttl_hours() -> i64 {
    24
}

fn default_pinning_api_url() -> String {
    "https://api.pinata.cloud".to_string()
}

fn default_pinning_gateway_url() -> String {
    "https://gateway.pinata.cloud/ipfs".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `REALTY_ENV`)
    /// 3. Environment variables with `REALTY_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("REALTY_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("REALTY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("REALTY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let auth = AuthConfig::default();
        assert!(auth.admin_password.is_none());
        assert!(auth.jwt_secret.is_none());
        assert_eq!(auth.session_ttl_hours, 24);
    }

    #[test]
    fn test_pinning_config_defaults() {
        let pinning = PinningConfig::default();
        assert!(pinning.api_key.is_none());
        assert_eq!(pinning.api_url, "https://api.pinata.cloud");
        assert_eq!(pinning.gateway_url, "https://gateway.pinata.cloud/ipfs");
    }
}
