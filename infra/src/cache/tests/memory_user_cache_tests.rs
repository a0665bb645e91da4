//! Unit tests for the in-memory user cache

use std::time::Duration;

use wb_core::domain::User;
use wb_core::errors::{DomainError, ErrorKind};
use wb_core::repositories::UserCache;
use wb_shared::config::UserCacheConfig;

use crate::cache::MemoryUserCache;

fn user(id: i64) -> User {
    let mut user = User::with_phone("13800138000");
    user.id = id;
    user.nickname = "Dora".to_string();
    user
}

#[tokio::test]
async fn test_set_then_get() {
    let cache = MemoryUserCache::new(&UserCacheConfig::default());
    cache.set(&user(7)).await.unwrap();

    assert_eq!(cache.get(7).await.unwrap(), user(7));
}

#[tokio::test]
async fn test_missing_is_not_found() {
    let cache = MemoryUserCache::new(&UserCacheConfig::default());
    let err = cache.get(7).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, DomainError::NotFound { resource } if resource == "user:info:7"));
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire_after_ttl() {
    let cache = MemoryUserCache::new(&UserCacheConfig::default());
    cache.set(&user(7)).await.unwrap();

    tokio::time::advance(Duration::from_secs(899)).await;
    assert!(cache.get(7).await.is_ok());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(cache.get(7).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_corrupt_payload_is_serialization_error() {
    let cache = MemoryUserCache::new(&UserCacheConfig::default());
    cache.put_raw(7, "{not json").await;

    let err = cache.get(7).await.unwrap_err();
    assert!(matches!(err, DomainError::Serialization { .. }));
    assert_eq!(err.kind(), ErrorKind::Transient);
}
