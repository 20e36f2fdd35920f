//! Token lifecycle configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{parse_var, ConfigError};

/// Secret used when `JWT_SECRET` is not provided
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// How issued tokens are represented and tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStrategy {
    /// Self-contained HS256 JWTs; the server only remembers revoked ids
    #[default]
    Signed,
    /// Bare random ids; the server keeps every active token
    Opaque,
}

impl TokenStrategy {
    /// Human readable service name used by the home endpoint
    pub fn service_name(&self) -> &'static str {
        match self {
            TokenStrategy::Signed => "JWT Token Service",
            TokenStrategy::Opaque => "Web Token Service",
        }
    }
}

impl fmt::Display for TokenStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenStrategy::Signed => write!(f, "signed"),
            TokenStrategy::Opaque => write!(f, "opaque"),
        }
    }
}

impl FromStr for TokenStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "signed" | "jwt" => Ok(TokenStrategy::Signed),
            "opaque" | "uuid" | "reference" => Ok(TokenStrategy::Opaque),
            _ => Err(format!("Invalid token strategy: {}", s)),
        }
    }
}

/// Token issuance, verification and cleanup configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Storage strategy selected at startup
    #[serde(default)]
    pub strategy: TokenStrategy,

    /// Shared HS256 secret for signed tokens
    pub secret: String,

    /// Lifetime applied when a request does not carry `expires_in`
    pub default_ttl_seconds: i64,

    /// Run the periodic expired-entry sweep
    #[serde(default)]
    pub cleanup_enabled: bool,

    /// Seconds between two sweeps
    pub cleanup_interval_seconds: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            strategy: TokenStrategy::Signed,
            secret: DEVELOPMENT_SECRET.to_string(),
            default_ttl_seconds: 3600, // 1 hour
            cleanup_enabled: false,
            cleanup_interval_seconds: 300,
        }
    }
}

impl TokenConfig {
    /// Create a signed-token configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Switch the storage strategy
    pub fn with_strategy(mut self, strategy: TokenStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the default lifetime in seconds
    pub fn with_default_ttl(mut self, seconds: i64) -> Self {
        self.default_ttl_seconds = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let strategy = match lookup("TOKEN_STRATEGY") {
            Some(raw) => raw
                .parse()
                .map_err(|e: String| ConfigError::new("TOKEN_STRATEGY", e))?,
            None => defaults.strategy,
        };

        Ok(Self {
            strategy,
            secret: lookup("JWT_SECRET").unwrap_or(defaults.secret),
            default_ttl_seconds: parse_var(lookup, "TOKEN_DEFAULT_TTL", defaults.default_ttl_seconds)?,
            cleanup_enabled: parse_var(lookup, "TOKEN_CLEANUP_ENABLED", defaults.cleanup_enabled)?,
            cleanup_interval_seconds: parse_var(
                lookup,
                "TOKEN_CLEANUP_INTERVAL",
                defaults.cleanup_interval_seconds,
            )?,
        })
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::new("JWT_SECRET", "secret must not be empty"));
        }
        if self.default_ttl_seconds <= 0 {
            return Err(ConfigError::new(
                "TOKEN_DEFAULT_TTL",
                "default lifetime must be a positive number of seconds",
            ));
        }
        if self.cleanup_enabled && self.cleanup_interval_seconds == 0 {
            return Err(ConfigError::new(
                "TOKEN_CLEANUP_INTERVAL",
                "interval must be at least one second",
            ));
        }
        Ok(())
    }
}
