//! Tests for the token cleanup service

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use tl_shared::config::TokenConfig;

use super::mocks::UnavailableActiveTokenStore;
use crate::domain::entities::Subject;
use crate::repositories::token::{ActiveTokenStore, InMemoryActiveTokenStore};
use crate::services::token::{
    ManualClock, OpaqueTokenManager, TokenCleanupConfig, TokenCleanupService, TokenManager,
    TokenServiceConfig,
};

fn opaque_with_clock() -> (Arc<dyn TokenManager>, Arc<InMemoryActiveTokenStore>, ManualClock) {
    let store = Arc::new(InMemoryActiveTokenStore::new());
    let clock = ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    let manager = OpaqueTokenManager::new(store.clone(), TokenServiceConfig::opaque())
        .unwrap()
        .with_clock(Arc::new(clock.clone()));
    (Arc::new(manager), store, clock)
}

fn enabled(interval_seconds: u64) -> TokenCleanupConfig {
    TokenCleanupConfig {
        interval_seconds,
        enabled: true,
    }
}

#[test]
fn test_config_from_token_config() {
    let mut token = TokenConfig::new("secret");
    token.cleanup_enabled = true;
    token.cleanup_interval_seconds = 42;

    let config = TokenCleanupConfig::from(&token);

    assert!(config.enabled);
    assert_eq!(config.interval_seconds, 42);
}

#[tokio::test]
async fn test_run_cleanup_reports_removed_entries() {
    let (manager, store, clock) = opaque_with_clock();
    manager.issue(Subject::Int(1), Some(5)).await.unwrap();
    manager.issue(Subject::Int(2), Some(5)).await.unwrap();
    manager.issue(Subject::Int(3), Some(500)).await.unwrap();
    clock.advance(Duration::seconds(6));

    let service = TokenCleanupService::new(manager, enabled(60));
    let result = service.run_cleanup().await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.expired_entries_removed, 2);
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_run_cleanup_collects_store_errors() {
    let manager = OpaqueTokenManager::new(
        Arc::new(UnavailableActiveTokenStore),
        TokenServiceConfig::opaque(),
    )
    .unwrap();

    let service = TokenCleanupService::new(Arc::new(manager), enabled(60));
    let result = service.run_cleanup().await.unwrap();

    assert!(!result.is_success());
    assert_eq!(result.expired_entries_removed, 0);
    assert_eq!(result.errors.len(), 1);
}

#[tokio::test]
async fn test_disabled_service_does_not_start() {
    let (manager, _, _) = opaque_with_clock();
    let service = Arc::new(TokenCleanupService::new(manager, TokenCleanupConfig::default()));

    assert!(!service.config().enabled);
    assert!(service.start_background_task().is_none());
}

#[tokio::test]
async fn test_zero_interval_does_not_start() {
    let (manager, _, _) = opaque_with_clock();
    let service = Arc::new(TokenCleanupService::new(manager, enabled(0)));

    assert!(service.start_background_task().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_background_task_purges_on_interval() {
    let (manager, store, clock) = opaque_with_clock();
    manager.issue(Subject::Int(1), Some(5)).await.unwrap();
    clock.advance(Duration::seconds(10));

    let service = Arc::new(TokenCleanupService::new(manager, enabled(30)));
    let handle = service.start_background_task().unwrap();

    tokio::time::sleep(std::time::Duration::from_secs(10)).await;
    assert_eq!(store.len().await.unwrap(), 1);

    tokio::time::sleep(std::time::Duration::from_secs(25)).await;
    assert_eq!(store.len().await.unwrap(), 0);

    handle.abort();
}
