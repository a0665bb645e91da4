//! In-memory collaborators for repository and service tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult};

use super::entity::UserEntity;
use super::traits::{UserCache, UserDao};

/// Mock database with unique email/phone/open-id columns and call counters
#[derive(Default)]
pub struct MockUserDao {
    rows: Mutex<HashMap<i64, UserEntity>>,
    next_id: Mutex<i64>,
    pub find_by_id_calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl MockUserDao {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row directly, bypassing uniqueness checks; returns its id
    pub fn seed(&self, mut entity: UserEntity) -> i64 {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        entity.id = *next_id;
        self.rows.lock().unwrap().insert(entity.id, entity);
        *next_id
    }

    pub fn row(&self, uid: i64) -> Option<UserEntity> {
        self.rows.lock().unwrap().get(&uid).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_failure(&self) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Database {
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn find_by<F>(&self, pred: F) -> DomainResult<UserEntity>
    where
        F: Fn(&UserEntity) -> bool,
    {
        self.check_failure()?;
        self.rows
            .lock()
            .unwrap()
            .values()
            .find(|row| pred(row))
            .cloned()
            .ok_or_else(DomainError::user_not_found)
    }
}

#[async_trait]
impl UserDao for MockUserDao {
    async fn insert(&self, mut user: UserEntity) -> DomainResult<()> {
        self.check_failure()?;
        {
            let rows = self.rows.lock().unwrap();
            let clash = rows.values().any(|row| {
                (user.email.is_some() && row.email == user.email)
                    || (user.phone.is_some() && row.phone == user.phone)
                    || (user.wechat_open_id.is_some() && row.wechat_open_id == user.wechat_open_id)
            });
            if clash {
                return Err(DomainError::DuplicateKey {
                    message: "users unique index".to_string(),
                });
            }
        }
        user.ctime = 1_700_000_000_000;
        user.utime = user.ctime;
        self.seed(user);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<UserEntity> {
        self.find_by(|row| row.email.as_deref() == Some(email))
    }

    async fn find_by_id(&self, uid: i64) -> DomainResult<UserEntity> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.find_by(|row| row.id == uid)
    }

    async fn find_by_phone(&self, phone: &str) -> DomainResult<UserEntity> {
        self.find_by(|row| row.phone.as_deref() == Some(phone))
    }

    async fn find_by_wechat(&self, open_id: &str) -> DomainResult<UserEntity> {
        self.find_by(|row| row.wechat_open_id.as_deref() == Some(open_id))
    }

    async fn update_by_id(&self, user: UserEntity) -> DomainResult<()> {
        self.check_failure()?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.get_mut(&user.id) {
            row.nickname = user.nickname;
            row.birthday = user.birthday;
            row.about_me = user.about_me;
            row.utime += 1;
        }
        Ok(())
    }
}

/// How the mock cache answers reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheReadMode {
    Normal,
    /// Every read fails with a transport error
    Unavailable,
}

/// Mock user cache without expiry
pub struct MockUserCache {
    entries: Mutex<HashMap<i64, User>>,
    read_mode: Mutex<CacheReadMode>,
    pub fail_writes: AtomicBool,
    pub set_calls: AtomicUsize,
}

impl MockUserCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            read_mode: Mutex::new(CacheReadMode::Normal),
            fail_writes: AtomicBool::new(false),
            set_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_read_mode(&self, mode: CacheReadMode) {
        *self.read_mode.lock().unwrap() = mode;
    }

    pub fn cached(&self, uid: i64) -> Option<User> {
        self.entries.lock().unwrap().get(&uid).cloned()
    }

    pub fn put(&self, user: User) {
        self.entries.lock().unwrap().insert(user.id, user);
    }
}

#[async_trait]
impl UserCache for MockUserCache {
    async fn get(&self, uid: i64) -> DomainResult<User> {
        if *self.read_mode.lock().unwrap() == CacheReadMode::Unavailable {
            return Err(DomainError::Cache {
                message: "connection reset by peer".to_string(),
            });
        }
        self.cached(uid).ok_or_else(|| DomainError::NotFound {
            resource: format!("user:info:{}", uid),
        })
    }

    async fn set(&self, user: &User) -> DomainResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Cache {
                message: "READONLY replica".to_string(),
            });
        }
        self.put(user.clone());
        Ok(())
    }
}

/// Poll until the repopulation task has written `uid` into `cache`
pub async fn wait_for_cached(cache: &MockUserCache, uid: i64) -> Option<User> {
    for _ in 0..200 {
        if let Some(user) = cache.cached(uid) {
            return Some(user);
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    None
}

/// Poll until the repopulation task has attempted `n` cache writes
pub async fn wait_for_set_calls(cache: &MockUserCache, n: usize) -> bool {
    for _ in 0..200 {
        if cache.set_calls.load(Ordering::SeqCst) >= n {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    false
}
