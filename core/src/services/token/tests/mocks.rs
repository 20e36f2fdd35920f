//! Store doubles for exercising failure paths

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::entities::ActiveToken;
use crate::errors::DomainError;
use crate::repositories::token::ActiveTokenStore;

/// Store that reports every id as already taken
#[derive(Default)]
pub struct CollidingActiveTokenStore {
    pub insert_attempts: AtomicUsize,
}

#[async_trait]
impl ActiveTokenStore for CollidingActiveTokenStore {
    async fn insert(&self, _id: &str, _token: ActiveToken) -> Result<bool, DomainError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }

    async fn get(&self, _id: &str) -> Result<Option<ActiveToken>, DomainError> {
        Ok(None)
    }

    async fn remove(&self, _id: &str) -> Result<Option<ActiveToken>, DomainError> {
        Ok(None)
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Ok(0)
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(0)
    }
}

/// Store whose every operation fails
pub struct UnavailableActiveTokenStore;

fn unavailable() -> DomainError {
    DomainError::internal("store unavailable")
}

#[async_trait]
impl ActiveTokenStore for UnavailableActiveTokenStore {
    async fn insert(&self, _id: &str, _token: ActiveToken) -> Result<bool, DomainError> {
        Err(unavailable())
    }

    async fn get(&self, _id: &str) -> Result<Option<ActiveToken>, DomainError> {
        Err(unavailable())
    }

    async fn remove(&self, _id: &str) -> Result<Option<ActiveToken>, DomainError> {
        Err(unavailable())
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Err(unavailable())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Err(unavailable())
    }
}
