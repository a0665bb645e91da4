//! Redis user cache storing JSON-encoded users under `user:info:{id}`

use async_trait::async_trait;
use wb_core::domain::User;
use wb_core::errors::{DomainError, DomainResult};
use wb_core::repositories::{user_key, UserCache};
use wb_shared::config::UserCacheConfig;

use super::RedisClient;

/// User cache backed by Redis
#[derive(Clone)]
pub struct RedisUserCache {
    client: RedisClient,
    ttl_seconds: u64,
}

impl RedisUserCache {
    pub fn new(client: RedisClient, config: &UserCacheConfig) -> Self {
        Self {
            client,
            ttl_seconds: config.ttl_seconds,
        }
    }
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get(&self, uid: i64) -> DomainResult<User> {
        let key = user_key(uid);
        match self.client.get(&key).await? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Err(DomainError::NotFound { resource: key }),
        }
    }

    async fn set(&self, user: &User) -> DomainResult<()> {
        let payload = serde_json::to_string(user)?;
        self.client
            .set_with_expiry(&user_key(user.id), &payload, self.ttl_seconds)
            .await?;
        Ok(())
    }
}
