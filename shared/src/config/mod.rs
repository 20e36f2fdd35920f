//! Configuration module
//!
//! - `auth` - token strategy, signing secret and lifetimes
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server binding

pub mod auth;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{TokenConfig, TokenStrategy};
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;

/// Error raised when the loaded configuration cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration for {key}: {message}")]
pub struct ConfigError {
    pub key: String,
    pub message: String,
}

impl ConfigError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token lifecycle configuration
    pub token: TokenConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            token: TokenConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to defaults; set but unparsable variables are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("ENVIRONMENT") {
            Some(value) => value
                .parse()
                .map_err(|e: String| ConfigError::new("ENVIRONMENT", e))?,
            None => Environment::default(),
        };

        let mut logging = LoggingConfig::for_environment(environment);
        if let Some(level) = lookup("LOG_LEVEL") {
            logging.level = level;
        }

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(&lookup)?,
            token: TokenConfig::from_lookup(&lookup)?,
            logging,
        })
    }

    /// Validate the configuration before the server starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.token.validate()?;

        if self.environment.is_production() && self.token.is_using_default_secret() {
            return Err(ConfigError::new(
                "JWT_SECRET",
                "the development secret must not be used in production",
            ));
        }

        Ok(())
    }
}

/// Parse an optional variable, keeping the default when it is unset
pub(crate) fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::new(key, format!("cannot parse '{}'", raw))),
        None => Ok(default),
    }
}
