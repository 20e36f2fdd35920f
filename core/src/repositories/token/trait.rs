//! Store traits holding the mutable token state of each strategy.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::ActiveToken;
use crate::errors::DomainError;

/// Set of revoked signed-token ids
///
/// Signed tokens carry their own claims, so the server only needs to
/// remember which ids were revoked. Entries are never dropped: a revoked
/// token keeps reporting revocation after it expires.
///
/// # Concurrency
/// Implementations are shared across request handlers and must make every
/// operation atomic with respect to the others.
#[async_trait]
pub trait RevokedTokenStore: Send + Sync {
    /// Record `id` as revoked
    ///
    /// # Returns
    /// * `Ok(true)` - The id was newly revoked
    /// * `Ok(false)` - The id was already revoked (no change)
    async fn revoke(&self, id: &str) -> Result<bool, DomainError>;

    /// Check whether `id` has been revoked
    async fn is_revoked(&self, id: &str) -> Result<bool, DomainError>;

    /// Number of revoked ids currently held
    async fn len(&self) -> Result<usize, DomainError>;

    async fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len().await? == 0)
    }
}

/// Map of active opaque tokens, keyed by token id
///
/// An opaque token is valid only while its entry is present; revocation
/// deletes the entry.
#[async_trait]
pub trait ActiveTokenStore: Send + Sync {
    /// Insert a new token
    ///
    /// # Returns
    /// * `Ok(true)` - The token was stored
    /// * `Ok(false)` - An entry with this id already exists (nothing changed)
    async fn insert(&self, id: &str, token: ActiveToken) -> Result<bool, DomainError>;

    /// Look up a token by id
    async fn get(&self, id: &str) -> Result<Option<ActiveToken>, DomainError>;

    /// Remove a token, returning the entry that was removed
    async fn remove(&self, id: &str) -> Result<Option<ActiveToken>, DomainError>;

    /// Delete entries that expired at or before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Number of tokens currently held
    async fn len(&self) -> Result<usize, DomainError>;

    async fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len().await? == 0)
    }
}
