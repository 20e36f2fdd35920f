//! In-memory store implementations
//!
//! State lives for the life of the process only and is lost on restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::ActiveToken;
use crate::errors::DomainError;

use super::r#trait::{ActiveTokenStore, RevokedTokenStore};

/// Revoked signed-token ids
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevokedTokenStore {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryRevokedTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevokedTokenStore for InMemoryRevokedTokenStore {
    async fn revoke(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.revoked.write().await.insert(id.to_string()))
    }

    async fn is_revoked(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.revoked.read().await.contains(id))
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.revoked.read().await.len())
    }
}

/// Active opaque tokens keyed by id
#[derive(Debug, Clone, Default)]
pub struct InMemoryActiveTokenStore {
    tokens: Arc<RwLock<HashMap<String, ActiveToken>>>,
}

impl InMemoryActiveTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActiveTokenStore for InMemoryActiveTokenStore {
    async fn insert(&self, id: &str, token: ActiveToken) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Check for duplicate
        if tokens.contains_key(id) {
            return Ok(false);
        }

        tokens.insert(id.to_string(), token);
        Ok(true)
    }

    async fn get(&self, id: &str) -> Result<Option<ActiveToken>, DomainError> {
        Ok(self.tokens.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &str) -> Result<Option<ActiveToken>, DomainError> {
        Ok(self.tokens.write().await.remove(id))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| !token.is_expired_at(now));

        Ok(initial_count - tokens.len())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.tokens.read().await.len())
    }
}
