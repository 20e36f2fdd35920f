//! Configuration for the token service

use tl_shared::config::auth::DEVELOPMENT_SECRET;
use tl_shared::config::{TokenConfig, TokenStrategy};

use crate::domain::entities::DEFAULT_TTL_SECONDS;

/// Configuration for the token managers
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Storage strategy
    pub strategy: TokenStrategy,
    /// HS256 signing secret (signed strategy only)
    pub jwt_secret: String,
    /// Lifetime used when the caller does not request one, in seconds
    pub default_ttl_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            strategy: TokenStrategy::Signed,
            jwt_secret: DEVELOPMENT_SECRET.to_string(),
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

impl TokenServiceConfig {
    pub fn signed(secret: impl Into<String>) -> Self {
        Self {
            strategy: TokenStrategy::Signed,
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn opaque() -> Self {
        Self {
            strategy: TokenStrategy::Opaque,
            ..Default::default()
        }
    }
}

impl From<&TokenConfig> for TokenServiceConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            strategy: config.strategy,
            jwt_secret: config.secret.clone(),
            default_ttl_seconds: config.default_ttl_seconds,
        }
    }
}
