//! Opaque (UUID reference) token manager

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use tl_shared::config::TokenStrategy;

use crate::domain::entities::{ActiveToken, IssuedToken, RevokeOutcome, Subject, VerifiedToken};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::token::{ActiveTokenStore, InMemoryActiveTokenStore};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;
use super::manager::{check_default_ttl, resolve_ttl, TokenManager};

/// Attempts at drawing an unused id before giving up
const MAX_ISSUE_ATTEMPTS: usize = 3;

/// Manager for opaque tokens
///
/// The token is a random UUID with no embedded meaning; its subject and
/// expiry live in the active-token store. Revoking deletes the entry.
pub struct OpaqueTokenManager<S: ActiveTokenStore = InMemoryActiveTokenStore> {
    store: Arc<S>,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<S: ActiveTokenStore> OpaqueTokenManager<S> {
    pub fn new(store: Arc<S>, config: TokenServiceConfig) -> DomainResult<Self> {
        check_default_ttl(config.default_ttl_seconds)?;
        Ok(Self {
            store,
            config,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl<S: ActiveTokenStore + 'static> TokenManager for OpaqueTokenManager<S> {
    fn strategy(&self) -> TokenStrategy {
        TokenStrategy::Opaque
    }

    fn default_ttl_seconds(&self) -> i64 {
        self.config.default_ttl_seconds
    }

    async fn issue(&self, subject: Subject, ttl_seconds: Option<i64>) -> DomainResult<IssuedToken> {
        let ttl = resolve_ttl(ttl_seconds, self.config.default_ttl_seconds)?;
        let record = ActiveToken::new(subject, self.clock.now(), ttl)?;

        for _ in 0..MAX_ISSUE_ATTEMPTS {
            let id = Uuid::new_v4().to_string();
            if self.store.insert(&id, record.clone()).await? {
                info!(subject = %record.subject, expires_in = ttl, "Opaque token issued");
                return Ok(IssuedToken {
                    token: id.clone(),
                    id,
                    subject: record.subject,
                    expires_in: ttl,
                    issued_at: record.issued_at,
                    expires_at: record.expires_at,
                });
            }
            warn!("Opaque token id collision, drawing a new one");
        }

        error!(attempts = MAX_ISSUE_ATTEMPTS, "Could not allocate an unused opaque token id");
        Err(TokenError::TokenGenerationFailed.into())
    }

    async fn verify(
        &self,
        token: &str,
        expected_subject: Option<&Subject>,
    ) -> DomainResult<VerifiedToken> {
        let record = self
            .store
            .get(token)
            .await?
            .ok_or(TokenError::InvalidToken)?;

        if record.is_expired_at(self.clock.now()) {
            debug!("Opaque token has expired");
            return Err(TokenError::TokenExpired.into());
        }

        if let Some(expected) = expected_subject {
            if expected != &record.subject {
                warn!(subject = %record.subject, "Opaque token presented for another subject");
                return Err(TokenError::SubjectMismatch.into());
            }
        }

        Ok(VerifiedToken {
            id: token.to_string(),
            subject: record.subject,
            issued_at: record.issued_at,
            expires_at: record.expires_at,
        })
    }

    async fn revoke(&self, token: &str) -> DomainResult<RevokeOutcome> {
        let record = self
            .store
            .remove(token)
            .await?
            .ok_or(TokenError::TokenNotFound)?;

        info!(subject = %record.subject, "Opaque token revoked");

        Ok(RevokeOutcome::Revoked {
            id: token.to_string(),
            subject: record.subject,
        })
    }

    async fn cleanup_expired(&self) -> DomainResult<usize> {
        self.store.purge_expired(self.clock.now()).await
    }
}
