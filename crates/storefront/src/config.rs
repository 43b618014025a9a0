//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local instance out of the
//! box against the public catalog API.
//!
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `BASE_URL` - Public URL for the storefront (default: http://localhost:3000)
//! - `CATALOG_API_URL` - Catalog source base URL (default: https://fakestoreapi.com)
//! - `CATALOG_CACHE_TTL_SECS` - Catalog response cache TTL (default: 300)
//! - `LOGIN_DELAY_MS` - Simulated sign-in round-trip delay (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Sentry event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry tracing sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Catalog source base URL (products are fetched from `{url}/products`)
    pub catalog_api_url: String,
    /// Catalog response cache TTL in seconds
    pub catalog_cache_ttl_secs: u64,
    /// Simulated sign-in round-trip delay in milliseconds
    pub login_delay_ms: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry performance tracing sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("HOST", "0.0.0.0")?;
        let port = parse_env_or_default("PORT", "3000")?;
        let base_url = get_env_or_default("BASE_URL", "http://localhost:3000");
        let catalog_api_url = get_env_or_default("CATALOG_API_URL", "https://fakestoreapi.com");
        let catalog_cache_ttl_secs = parse_env_or_default("CATALOG_CACHE_TTL_SECS", "300")?;
        let login_delay_ms = parse_env_or_default("LOGIN_DELAY_MS", "1000")?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_api_url,
            catalog_cache_ttl_secs,
            login_delay_ms,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public base URL is served over HTTPS.
    ///
    /// Drives the secure flag on the session cookie.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for StorefrontConfig {
    /// The out-of-the-box local configuration, without reading the
    /// environment. Tests build on this and override what they probe.
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            catalog_api_url: "https://fakestoreapi.com".to_owned(),
            catalog_cache_ttl_secs: 300,
            login_delay_ms: 1000,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable with a default and parse it.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.catalog_api_url, "https://fakestoreapi.com");
        assert_eq!(config.catalog_cache_ttl_secs, 300);
        assert_eq!(config.login_delay_ms, 1000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            ..StorefrontConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_is_secure_follows_base_url_scheme() {
        let mut config = StorefrontConfig::default();
        assert!(!config.is_secure());

        config.base_url = "https://shop.copperfern.dev".to_owned();
        assert!(config.is_secure());
    }

    #[test]
    fn test_parse_env_or_default_uses_default_when_absent() {
        let port: u16 = parse_env_or_default("COPPER_FERN_TEST_ABSENT_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }
}
