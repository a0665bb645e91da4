//! In-process stores with the same semantics as the Redis ones
//!
//! Used for development and tests. State is per process and lost on restart.
//! Expiry is measured with `tokio::time::Instant`, so paused-clock tests can
//! step through cooldowns and expirations.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error};
use wb_core::domain::User;
use wb_core::errors::{DomainError, DomainResult};
use wb_core::repositories::{code_key, user_key, CodeCache, UserCache};
use wb_shared::config::{UserCacheConfig, VerificationConfig};

#[derive(Debug, Clone)]
struct CodeEntry {
    code: String,
    attempts_left: u32,
    /// `None` only for entries planted by tests to mimic a key without expiry
    expires_at: Option<Instant>,
}

impl CodeEntry {
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

/// Verification code store held in a process-local map
pub struct MemoryCodeCache {
    entries: Mutex<HashMap<String, CodeEntry>>,
    expiration: Duration,
    resend_interval: Duration,
    max_attempts: u32,
}

impl MemoryCodeCache {
    pub fn new(config: &VerificationConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            expiration: Duration::from_secs(config.expiration_seconds),
            resend_interval: Duration::from_secs(config.resend_interval_seconds),
            max_attempts: config.max_attempts,
        }
    }

    /// Plant an entry that never expires
    #[cfg(test)]
    pub(crate) async fn insert_without_expiry(&self, biz: &str, phone: &str, code: &str) {
        self.entries.lock().await.insert(
            code_key(biz, phone),
            CodeEntry {
                code: code.to_string(),
                attempts_left: self.max_attempts,
                expires_at: None,
            },
        );
    }

    /// Attempts left for `(biz, phone)`, `None` when no live entry exists
    pub async fn attempts_left(&self, biz: &str, phone: &str) -> Option<u32> {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .get(&code_key(biz, phone))
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.attempts_left)
    }
}

#[async_trait]
impl CodeCache for MemoryCodeCache {
    async fn set(&self, biz: &str, phone: &str, code: &str) -> DomainResult<()> {
        let key = code_key(biz, phone);
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get(&key) {
            if !entry.is_expired(now) {
                let Some(expires_at) = entry.expires_at else {
                    error!(key = %key, "Verification code key exists without expiry");
                    return Err(DomainError::Integrity {
                        message: format!("{} has no expiry", key),
                    });
                };
                let remaining = expires_at.saturating_duration_since(now);
                if remaining >= self.expiration.saturating_sub(self.resend_interval) {
                    return Err(DomainError::CodeSendTooMany);
                }
            }
        }

        entries.insert(
            key,
            CodeEntry {
                code: code.to_string(),
                attempts_left: self.max_attempts,
                expires_at: Some(now + self.expiration),
            },
        );
        debug!(biz, "Verification code stored in memory");
        Ok(())
    }

    async fn verify(&self, biz: &str, phone: &str, input_code: &str) -> DomainResult<bool> {
        let key = code_key(biz, phone);
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let Some(entry) = entries.get_mut(&key) else {
            return Ok(false);
        };
        if entry.is_expired(now) {
            entries.remove(&key);
            return Ok(false);
        }
        if entry.attempts_left == 0 {
            return Err(DomainError::CodeVerifyTooMany);
        }
        if entry.code == input_code {
            entries.remove(&key);
            return Ok(true);
        }
        entry.attempts_left -= 1;
        Ok(false)
    }
}

/// User cache held in a process-local map, storing the same JSON as Redis
pub struct MemoryUserCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    ttl: Duration,
}

impl MemoryUserCache {
    pub fn new(config: &UserCacheConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::from_secs(config.ttl_seconds),
        }
    }

    /// Overwrite the raw payload for `uid`
    #[cfg(test)]
    pub(crate) async fn put_raw(&self, uid: i64, payload: &str) {
        self.entries
            .lock()
            .await
            .insert(user_key(uid), (payload.to_string(), Instant::now() + self.ttl));
    }
}

#[async_trait]
impl UserCache for MemoryUserCache {
    async fn get(&self, uid: i64) -> DomainResult<User> {
        let key = user_key(uid);
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let live = match entries.get(&key) {
            Some((payload, expires_at)) if *expires_at > now => Some(payload.clone()),
            _ => None,
        };

        match live {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => {
                entries.remove(&key);
                Err(DomainError::NotFound { resource: key })
            }
        }
    }

    async fn set(&self, user: &User) -> DomainResult<()> {
        let payload = serde_json::to_string(user)?;
        self.entries
            .lock()
            .await
            .insert(user_key(user.id), (payload, Instant::now() + self.ttl));
        Ok(())
    }
}
