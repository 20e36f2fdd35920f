//! Strategy-independent token manager interface

use async_trait::async_trait;
use std::sync::Arc;

use tl_shared::config::TokenStrategy;

use crate::domain::entities::{IssuedToken, RevokeOutcome, Subject, VerifiedToken};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::token::{InMemoryActiveTokenStore, InMemoryRevokedTokenStore};

use super::config::TokenServiceConfig;
use super::opaque::OpaqueTokenManager;
use super::signed::SignedTokenManager;

/// Issues, verifies and revokes tokens for one storage strategy
///
/// Verification checks run in a fixed order and the first failure decides
/// the error: structure/signature or existence (`InvalidToken`), revocation
/// (`TokenRevoked`), expiry (`TokenExpired`), then the optional subject
/// cross-check (`SubjectMismatch`). A token that is both revoked and expired
/// reports `TokenRevoked`.
#[async_trait]
pub trait TokenManager: Send + Sync {
    /// Strategy implemented by this manager
    fn strategy(&self) -> TokenStrategy;

    /// Lifetime applied when `issue` is called without one
    fn default_ttl_seconds(&self) -> i64;

    /// Issue a new token for `subject`
    ///
    /// # Errors
    /// * `ValidationError` - `ttl_seconds` is not a positive, representable lifetime
    /// * `TokenError::TokenGenerationFailed` - the token could not be produced
    async fn issue(&self, subject: Subject, ttl_seconds: Option<i64>) -> DomainResult<IssuedToken>;

    /// Verify `token`, optionally requiring it to belong to `expected_subject`
    ///
    /// Never mutates state.
    async fn verify(
        &self,
        token: &str,
        expected_subject: Option<&Subject>,
    ) -> DomainResult<VerifiedToken>;

    /// Revoke `token` so that it never verifies again
    async fn revoke(&self, token: &str) -> DomainResult<RevokeOutcome>;

    /// Drop stored state that can no longer affect a verification outcome
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn cleanup_expired(&self) -> DomainResult<usize>;
}

/// Build the manager selected by `config.strategy`, backed by in-memory stores
pub fn build_token_manager(config: TokenServiceConfig) -> DomainResult<Arc<dyn TokenManager>> {
    let manager: Arc<dyn TokenManager> = match config.strategy {
        TokenStrategy::Signed => Arc::new(SignedTokenManager::new(
            Arc::new(InMemoryRevokedTokenStore::new()),
            config,
        )?),
        TokenStrategy::Opaque => Arc::new(OpaqueTokenManager::new(
            Arc::new(InMemoryActiveTokenStore::new()),
            config,
        )?),
    };
    Ok(manager)
}

/// Resolve the lifetime for an issuance request
pub(crate) fn resolve_ttl(requested: Option<i64>, default_ttl: i64) -> Result<i64, ValidationError> {
    let ttl = requested.unwrap_or(default_ttl);
    if ttl <= 0 {
        return Err(ValidationError::NonPositive {
            field: "expires_in".to_string(),
        });
    }
    Ok(ttl)
}

/// Check the configured default lifetime
pub(crate) fn check_default_ttl(default_ttl: i64) -> DomainResult<()> {
    if default_ttl <= 0 {
        return Err(DomainError::internal("default token lifetime must be positive"));
    }
    Ok(())
}
