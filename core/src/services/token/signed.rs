//! Signed (HS256 JWT) token manager

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use tl_shared::config::TokenStrategy;

use crate::domain::entities::{Claims, IssuedToken, RevokeOutcome, Subject, VerifiedToken};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::token::{InMemoryRevokedTokenStore, RevokedTokenStore};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;
use super::manager::{check_default_ttl, resolve_ttl, TokenManager};

/// Algorithm used to sign and verify tokens
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Manager for self-contained signed tokens
///
/// The token carries `{jti, sub, iat, exp}`; the only server-side state is
/// the set of revoked `jti` values.
pub struct SignedTokenManager<S: RevokedTokenStore = InMemoryRevokedTokenStore> {
    store: Arc<S>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl<S: RevokedTokenStore> SignedTokenManager<S> {
    /// Creates a new signed token manager
    ///
    /// # Arguments
    ///
    /// * `store` - Revocation set
    /// * `config` - Token service configuration
    pub fn new(store: Arc<S>, config: TokenServiceConfig) -> DomainResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::internal("signing secret must not be empty"));
        }
        check_default_ttl(config.default_ttl_seconds)?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked after revocation, against our own clock
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            store,
            config,
            encoding_key,
            decoding_key,
            validation,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Check the signature and structure of `token` and return its claims
    ///
    /// Expiry is not checked here.
    pub fn decode_claims(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Signed token rejected");
                DomainError::Token(TokenError::InvalidToken)
            })
    }

    fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

#[async_trait]
impl<S: RevokedTokenStore + 'static> TokenManager for SignedTokenManager<S> {
    fn strategy(&self) -> TokenStrategy {
        TokenStrategy::Signed
    }

    fn default_ttl_seconds(&self) -> i64 {
        self.config.default_ttl_seconds
    }

    async fn issue(&self, subject: Subject, ttl_seconds: Option<i64>) -> DomainResult<IssuedToken> {
        let ttl = resolve_ttl(ttl_seconds, self.config.default_ttl_seconds)?;
        let claims = Claims::new(Uuid::new_v4().to_string(), subject, self.clock.now(), ttl)?;
        let token = self.encode_jwt(&claims)?;

        info!(jti = %claims.jti, subject = %claims.sub, expires_in = ttl, "Signed token issued");

        Ok(IssuedToken {
            token,
            id: claims.jti.clone(),
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
            subject: claims.sub,
            expires_in: ttl,
        })
    }

    async fn verify(
        &self,
        token: &str,
        expected_subject: Option<&Subject>,
    ) -> DomainResult<VerifiedToken> {
        let claims = self.decode_claims(token)?;

        if self.store.is_revoked(&claims.jti).await? {
            debug!(jti = %claims.jti, "Signed token is revoked");
            return Err(TokenError::TokenRevoked.into());
        }

        if claims.is_expired_at(self.clock.now()) {
            debug!(jti = %claims.jti, "Signed token has expired");
            return Err(TokenError::TokenExpired.into());
        }

        if let Some(expected) = expected_subject {
            if expected != &claims.sub {
                warn!(jti = %claims.jti, "Signed token presented for another subject");
                return Err(TokenError::SubjectMismatch.into());
            }
        }

        Ok(claims.into())
    }

    async fn revoke(&self, token: &str) -> DomainResult<RevokeOutcome> {
        let claims = self.decode_claims(token)?;

        if claims.is_expired_at(self.clock.now()) {
            debug!(jti = %claims.jti, "Revocation skipped for expired token");
            return Ok(RevokeOutcome::AlreadyExpired {
                id: claims.jti,
                subject: claims.sub,
            });
        }

        let newly_revoked = self.store.revoke(&claims.jti).await?;
        if newly_revoked {
            info!(jti = %claims.jti, subject = %claims.sub, "Signed token revoked");
        } else {
            debug!(jti = %claims.jti, "Signed token was already revoked");
        }

        Ok(RevokeOutcome::Revoked {
            id: claims.jti,
            subject: claims.sub,
        })
    }

    /// Revocation entries are kept for the life of the process
    async fn cleanup_expired(&self) -> DomainResult<usize> {
        Ok(0)
    }
}
