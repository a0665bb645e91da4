//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use wb_core::errors::{DomainError, DomainResult};
use wb_core::repositories::{UserDao, UserEntity};

/// In-process `users` table that counts primary-key reads
#[derive(Default)]
pub struct InMemoryUserDao {
    rows: Mutex<Vec<UserEntity>>,
    pub find_by_id_calls: AtomicUsize,
}

impl InMemoryUserDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_reads(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    async fn find_by<F>(&self, pred: F) -> DomainResult<UserEntity>
    where
        F: Fn(&UserEntity) -> bool,
    {
        self.rows
            .lock()
            .await
            .iter()
            .find(|row| pred(row))
            .cloned()
            .ok_or_else(DomainError::user_not_found)
    }
}

#[async_trait]
impl UserDao for InMemoryUserDao {
    async fn insert(&self, mut user: UserEntity) -> DomainResult<()> {
        let mut rows = self.rows.lock().await;
        let taken = rows.iter().any(|row| {
            (user.email.is_some() && row.email == user.email)
                || (user.phone.is_some() && row.phone == user.phone)
                || (user.wechat_open_id.is_some() && row.wechat_open_id == user.wechat_open_id)
        });
        if taken {
            return Err(DomainError::DuplicateKey {
                message: "Duplicate entry for users unique key".to_string(),
            });
        }
        user.id = rows.len() as i64 + 1;
        user.ctime = 1_700_000_000_000;
        user.utime = user.ctime;
        rows.push(user);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<UserEntity> {
        self.find_by(|row| row.email.as_deref() == Some(email)).await
    }

    async fn find_by_id(&self, uid: i64) -> DomainResult<UserEntity> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.find_by(|row| row.id == uid).await
    }

    async fn find_by_phone(&self, phone: &str) -> DomainResult<UserEntity> {
        self.find_by(|row| row.phone.as_deref() == Some(phone)).await
    }

    async fn find_by_wechat(&self, open_id: &str) -> DomainResult<UserEntity> {
        self.find_by(|row| row.wechat_open_id.as_deref() == Some(open_id)).await
    }

    async fn update_by_id(&self, user: UserEntity) -> DomainResult<()> {
        let mut rows = self.rows.lock().await;
        if let Some(row) = rows.iter_mut().find(|row| row.id == user.id) {
            row.nickname = user.nickname;
            row.birthday = user.birthday;
            row.about_me = user.about_me;
            row.utime += 1;
        }
        Ok(())
    }
}

/// Install a test subscriber so failures come with logs
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
