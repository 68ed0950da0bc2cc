//! Certificate Storage Integration Tests
//!
//! Exercises the full public contract through the crate API: the site
//! lifecycle (store, load, delete), account storage with the
//! most-recent-user pointer, and issuance-lock coordination between
//! concurrent tasks.

use acme_store::{CertStorage, InMemoryObjectStore, KeyNamespace, SiteRecord, UserRecord};
use std::sync::Arc;
use std::time::Duration;

fn storage() -> CertStorage {
    CertStorage::new(
        Arc::new(InMemoryObjectStore::new()),
        KeyNamespace::for_ca_host("acme-staging.api.example.org"),
    )
}

#[tokio::test]
async fn test_site_lifecycle() {
    let storage = storage();
    let record = SiteRecord {
        cert: b"cert".to_vec(),
        key: b"key".to_vec(),
        meta: b"meta".to_vec(),
    };

    // Nothing stored yet
    assert!(!storage.site_exists("example.com").await.unwrap());
    assert!(storage
        .load_site("example.com")
        .await
        .unwrap_err()
        .is_not_exist());

    // Store and read back
    storage.store_site("example.com", &record).await.unwrap();
    assert!(storage.site_exists("example.com").await.unwrap());
    assert_eq!(storage.load_site("example.com").await.unwrap(), record);

    // Delete and verify absence
    storage.delete_site("example.com").await.unwrap();
    assert!(!storage.site_exists("example.com").await.unwrap());
    assert!(storage
        .load_site("example.com")
        .await
        .unwrap_err()
        .is_not_exist());
}

#[tokio::test]
async fn test_site_overwrite_replaces_all_fields() {
    let storage = storage();
    let first = SiteRecord {
        cert: b"old cert".to_vec(),
        key: b"old key".to_vec(),
        meta: b"old meta".to_vec(),
    };
    let second = SiteRecord {
        cert: b"new cert".to_vec(),
        key: b"new key".to_vec(),
        meta: Vec::new(),
    };

    storage.store_site("example.com", &first).await.unwrap();
    storage.store_site("example.com", &second).await.unwrap();

    assert_eq!(storage.load_site("example.com").await.unwrap(), second);
}

#[tokio::test]
async fn test_user_lifecycle_and_recent_pointer() {
    let storage = storage();
    let record = UserRecord {
        reg: b"registration blob".to_vec(),
        key: b"account key".to_vec(),
    };

    // Unknown account
    assert!(storage
        .load_user("me@example.com")
        .await
        .unwrap_err()
        .is_not_exist());
    assert_eq!(storage.most_recent_user_email().await, "");

    // A failed load leaves the pointer untouched
    storage.store_user("me@example.com", &record).await.unwrap();
    let _ = storage.load_user("other@example.com").await;

    assert_eq!(storage.load_user("me@example.com").await.unwrap(), record);
    assert_eq!(storage.most_recent_user_email().await, "me@example.com");
}

#[tokio::test]
async fn test_case_insensitive_lookup() {
    let storage = storage();
    let record = SiteRecord {
        cert: b"c".to_vec(),
        key: b"k".to_vec(),
        meta: b"m".to_vec(),
    };

    storage.store_site("Example.com", &record).await.unwrap();
    assert_eq!(storage.load_site("EXAMPLE.COM").await.unwrap(), record);
    assert!(storage.site_exists("example.com").await.unwrap());
}

#[tokio::test]
async fn test_lock_contention_exactly_one_winner() {
    let storage = Arc::new(storage());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let storage = storage.clone();
        handles.push(tokio::spawn(
            async move { storage.try_lock("example.com").is_none() },
        ));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    // Owner releases; next attempt acquires outright.
    storage.unlock("example.com").unwrap();
    assert!(storage.try_lock("example.com").is_none());
}

#[tokio::test]
async fn test_waiter_resolves_then_reacquire() {
    let storage = Arc::new(storage());

    assert!(storage.try_lock("example.com").is_none());
    let waiter = storage.try_lock("example.com").expect("lock is held");

    let contender = {
        let storage = storage.clone();
        tokio::spawn(async move {
            waiter.wait().await;
            // Resolving the wait grants nothing; claim again.
            storage.try_lock("example.com").is_none()
        })
    };

    storage.unlock("example.com").unwrap();

    let acquired = tokio::time::timeout(Duration::from_secs(1), contender)
        .await
        .expect("waiter should resolve after unlock")
        .unwrap();
    assert!(acquired);
}

#[tokio::test]
async fn test_unlock_without_claim_fails() {
    let storage = storage();
    let err = storage.unlock("never-locked.example.com").unwrap_err();
    assert_eq!(
        err.to_string(),
        "No lock to release for never-locked.example.com"
    );
}
