//! Unit tests for the cached user repository

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::domain::entities::user::{User, WechatInfo};
use crate::errors::ErrorKind;
use crate::repositories::user::mock::{
    wait_for_cached, wait_for_set_calls, CacheReadMode, MockUserCache, MockUserDao,
};
use crate::repositories::user::{CachedUserRepository, UserEntity, UserRepository};

fn setup() -> (
    Arc<MockUserDao>,
    Arc<MockUserCache>,
    CachedUserRepository<MockUserDao, MockUserCache>,
) {
    let dao = Arc::new(MockUserDao::new());
    let cache = Arc::new(MockUserCache::new());
    let repo = CachedUserRepository::new(dao.clone(), cache.clone());
    (dao, cache, repo)
}

fn stored(phone: &str) -> UserEntity {
    UserEntity {
        phone: Some(phone.to_string()),
        nickname: "stored".to_string(),
        ctime: 1_700_000_000_000,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_find_by_id_served_from_cache_after_miss() {
    let (dao, cache, repo) = setup();
    let uid = dao.seed(stored("13800138000"));

    let first = repo.find_by_id(uid).await.unwrap();
    assert_eq!(first.phone, "13800138000");
    assert_eq!(dao.find_by_id_calls.load(Ordering::SeqCst), 1);

    let cached = wait_for_cached(&cache, uid).await.expect("cache was not repopulated");
    assert_eq!(cached, first);

    let second = repo.find_by_id(uid).await.unwrap();
    assert_eq!(second, first);
    assert_eq!(dao.find_by_id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_find_by_id_cache_hit_skips_database() {
    let (dao, cache, repo) = setup();
    let mut user = User::with_phone("13900139000");
    user.id = 77;
    cache.put(user.clone());

    let found = repo.find_by_id(77).await.unwrap();
    assert_eq!(found, user);
    assert_eq!(dao.find_by_id_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_find_by_id_falls_back_when_cache_unavailable() {
    let (dao, cache, repo) = setup();
    let uid = dao.seed(stored("13800138001"));
    cache.set_read_mode(CacheReadMode::Unavailable);

    let found = repo.find_by_id(uid).await.unwrap();
    assert_eq!(found.nickname, "stored");
    assert_eq!(dao.find_by_id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_find_by_id_propagates_not_found() {
    let (_dao, _cache, repo) = setup();
    let err = repo.find_by_id(404).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_find_by_id_propagates_database_failure() {
    let (dao, _cache, repo) = setup();
    let uid = dao.seed(stored("13800138002"));
    dao.fail.store(true, Ordering::SeqCst);

    let err = repo.find_by_id(uid).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transient);
}

#[tokio::test]
async fn test_repopulation_failure_does_not_fail_read() {
    let (dao, cache, repo) = setup();
    let uid = dao.seed(stored("13800138003"));
    cache.fail_writes.store(true, Ordering::SeqCst);

    let found = repo.find_by_id(uid).await.unwrap();
    assert_eq!(found.id, uid);
    assert!(wait_for_set_calls(&cache, 1).await);
    assert!(cache.cached(uid).is_none());

    // Still readable, straight from the database
    repo.find_by_id(uid).await.unwrap();
    assert_eq!(dao.find_by_id_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_update_does_not_touch_cache() {
    let (dao, cache, repo) = setup();
    let uid = dao.seed(stored("13800138004"));
    let before = repo.find_by_id(uid).await.unwrap();
    wait_for_cached(&cache, uid).await.unwrap();

    let mut edit = before.clone();
    edit.nickname = "renamed".to_string();
    repo.update_non_zero_fields(edit).await.unwrap();

    assert_eq!(dao.row(uid).unwrap().nickname, "renamed");
    // Cached copy stays stale until it expires
    assert_eq!(repo.find_by_id(uid).await.unwrap().nickname, "stored");
    assert_eq!(cache.set_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_create_and_lookups_translate_records() {
    let (dao, cache, repo) = setup();
    let mut user = User::with_email("c@example.com", "hash");
    user.wechat_info = WechatInfo::new("open-c", "union-c");
    repo.create(user).await.unwrap();

    let row = dao.row(1).unwrap();
    assert_eq!(row.phone, None);
    assert_eq!(row.email.as_deref(), Some("c@example.com"));

    let by_email = repo.find_by_email("c@example.com").await.unwrap();
    assert_eq!(by_email.id, 1);
    assert!(by_email.phone.is_empty());

    let by_wechat = repo.find_by_wechat("open-c").await.unwrap();
    assert_eq!(by_wechat.wechat_info.union_id, "union-c");

    assert!(repo.find_by_phone("13800000000").await.unwrap_err().is_not_found());
    assert_eq!(cache.set_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_create_duplicate_email() {
    let (_dao, _cache, repo) = setup();
    repo.create(User::with_email("d@example.com", "h1")).await.unwrap();
    let err = repo
        .create(User::with_email("d@example.com", "h2"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
}
