//! Tests for the opaque token manager

use chrono::{Duration, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use super::mocks::CollidingActiveTokenStore;
use crate::domain::entities::{RevokeOutcome, Subject};
use crate::errors::{DomainError, TokenError};
use crate::repositories::token::{ActiveTokenStore, InMemoryActiveTokenStore};
use crate::services::token::{ManualClock, OpaqueTokenManager, TokenManager, TokenServiceConfig};

fn manual_manager() -> (OpaqueTokenManager, Arc<InMemoryActiveTokenStore>, ManualClock) {
    let store = Arc::new(InMemoryActiveTokenStore::new());
    let clock = ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    let manager = OpaqueTokenManager::new(store.clone(), TokenServiceConfig::opaque())
        .unwrap()
        .with_clock(Arc::new(clock.clone()));
    (manager, store, clock)
}

fn token_error(result: Result<impl std::fmt::Debug, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issue_returns_uuid_and_stores_it() {
    let (manager, store, _) = manual_manager();

    let issued = manager.issue(Subject::Int(42), None).await.unwrap();

    assert!(Uuid::parse_str(&issued.token).is_ok());
    assert_eq!(issued.token, issued.id);
    assert_eq!(issued.expires_in, 3600);

    let record = store.get(&issued.token).await.unwrap().unwrap();
    assert_eq!(record.subject, Subject::Int(42));
    assert_eq!(record.expires_at, issued.expires_at);
}

#[tokio::test]
async fn test_issued_tokens_are_distinct() {
    let (manager, store, _) = manual_manager();
    let mut tokens = HashSet::new();

    for _ in 0..120 {
        let issued = manager.issue(Subject::from("alice"), None).await.unwrap();
        assert!(tokens.insert(issued.token));
    }

    assert_eq!(store.len().await.unwrap(), 120);
}

#[tokio::test]
async fn test_verify_known_token() {
    let (manager, _, _) = manual_manager();
    let issued = manager.issue(Subject::from("alice"), None).await.unwrap();

    let verified = manager
        .verify(&issued.token, Some(&Subject::from("alice")))
        .await
        .unwrap();

    assert_eq!(verified.subject, Subject::from("alice"));
    assert_eq!(verified.id, issued.token);
}

#[tokio::test]
async fn test_verify_unknown_token() {
    let (manager, _, _) = manual_manager();

    assert_eq!(
        token_error(manager.verify(&Uuid::new_v4().to_string(), None).await),
        TokenError::InvalidToken
    );
    assert_eq!(
        token_error(manager.verify("a.b.c", None).await),
        TokenError::InvalidToken
    );
}

#[tokio::test]
async fn test_verify_subject_mismatch() {
    let (manager, _, _) = manual_manager();
    let issued = manager.issue(Subject::Int(123), None).await.unwrap();

    assert_eq!(
        token_error(manager.verify(&issued.token, Some(&Subject::Int(456))).await),
        TokenError::SubjectMismatch
    );
    assert_eq!(
        token_error(manager.verify(&issued.token, Some(&Subject::from("123"))).await),
        TokenError::SubjectMismatch
    );
}

#[tokio::test]
async fn test_verify_expiry_boundary() {
    let (manager, _, clock) = manual_manager();
    let issued = manager.issue(Subject::Int(1), Some(60)).await.unwrap();

    clock.advance(Duration::seconds(59));
    assert!(manager.verify(&issued.token, None).await.is_ok());

    clock.advance(Duration::seconds(1));
    assert_eq!(
        token_error(manager.verify(&issued.token, None).await),
        TokenError::TokenExpired
    );
}

#[tokio::test]
async fn test_one_second_token_issued_late_in_a_second_stays_valid() {
    let (manager, _, clock) = manual_manager();
    let issued_at = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
    clock.set(issued_at);

    let issued = manager.issue(Subject::Int(1), Some(1)).await.unwrap();

    clock.advance(Duration::milliseconds(2));
    assert!(manager.verify(&issued.token, None).await.is_ok());

    clock.set(issued_at + Duration::seconds(1));
    assert_eq!(
        token_error(manager.verify(&issued.token, None).await),
        TokenError::TokenExpired
    );
}

#[tokio::test]
async fn test_revoke_then_verify() {
    let (manager, store, _) = manual_manager();
    let issued = manager.issue(Subject::Int(9), None).await.unwrap();

    let outcome = manager.revoke(&issued.token).await.unwrap();

    assert_eq!(
        outcome,
        RevokeOutcome::Revoked {
            id: issued.token.clone(),
            subject: Subject::Int(9)
        }
    );
    assert!(store.is_empty().await.unwrap());
    assert_eq!(
        token_error(manager.verify(&issued.token, None).await),
        TokenError::InvalidToken
    );
}

#[tokio::test]
async fn test_revoke_twice_reports_not_found() {
    let (manager, _, _) = manual_manager();
    let issued = manager.issue(Subject::Int(9), None).await.unwrap();

    manager.revoke(&issued.token).await.unwrap();

    assert_eq!(
        token_error(manager.revoke(&issued.token).await),
        TokenError::TokenNotFound
    );
    assert_eq!(
        token_error(manager.revoke("never-issued").await),
        TokenError::TokenNotFound
    );
}

#[tokio::test]
async fn test_cleanup_removes_only_expired_tokens() {
    let (manager, store, clock) = manual_manager();
    let short = manager.issue(Subject::Int(1), Some(10)).await.unwrap();
    let long = manager.issue(Subject::Int(2), Some(100)).await.unwrap();

    clock.advance(Duration::seconds(10));
    let removed = manager.cleanup_expired().await.unwrap();

    assert_eq!(removed, 1);
    assert_eq!(store.len().await.unwrap(), 1);
    assert!(manager.verify(&long.token, None).await.is_ok());
    assert_eq!(
        token_error(manager.verify(&short.token, None).await),
        TokenError::InvalidToken
    );
}

#[tokio::test]
async fn test_issue_gives_up_after_repeated_collisions() {
    let store = Arc::new(CollidingActiveTokenStore::default());
    let manager = OpaqueTokenManager::new(store.clone(), TokenServiceConfig::opaque()).unwrap();

    assert_eq!(
        token_error(manager.issue(Subject::Int(1), None).await),
        TokenError::TokenGenerationFailed
    );
    assert_eq!(store.insert_attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_issue_and_revoke() {
    let manager = Arc::new(
        OpaqueTokenManager::new(
            Arc::new(InMemoryActiveTokenStore::new()),
            TokenServiceConfig::opaque(),
        )
        .unwrap(),
    );

    let mut handles = Vec::new();
    for i in 0..32 {
        let manager = manager.clone();
        handles.push(tokio::spawn(async move {
            let issued = manager.issue(Subject::Int(i), None).await.unwrap();
            manager.verify(&issued.token, Some(&Subject::Int(i))).await.unwrap();
            manager.revoke(&issued.token).await.unwrap();
            manager.verify(&issued.token, None).await.is_err()
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}
