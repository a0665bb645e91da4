//! User persistence interfaces: the cache, the source of truth, and the
//! repository that merges them.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

use super::entity::UserEntity;

/// Key of the cached record for `uid`
pub fn user_key(uid: i64) -> String {
    format!("user:info:{}", uid)
}

/// Time-bounded cache of user records keyed by id
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Fetch the cached record
    ///
    /// # Errors
    /// * `DomainError::NotFound` - nothing cached for `uid`
    /// * `DomainError::Serialization` - the cached payload is corrupt
    /// * `DomainError::Cache` - the store could not be reached
    async fn get(&self, uid: i64) -> DomainResult<User>;

    /// Write `user` with the configured time-to-live, replacing any entry
    async fn set(&self, user: &User) -> DomainResult<()>;
}

/// Source of truth for user records
#[async_trait]
pub trait UserDao: Send + Sync {
    /// Insert a new row; `ctime`/`utime` are stamped by the store
    ///
    /// Fails with `DomainError::DuplicateKey` when email, phone or open id is
    /// already taken.
    async fn insert(&self, user: UserEntity) -> DomainResult<()>;

    async fn find_by_email(&self, email: &str) -> DomainResult<UserEntity>;

    async fn find_by_id(&self, uid: i64) -> DomainResult<UserEntity>;

    async fn find_by_phone(&self, phone: &str) -> DomainResult<UserEntity>;

    async fn find_by_wechat(&self, open_id: &str) -> DomainResult<UserEntity>;

    /// Overwrite nickname, birthday and about-me of the row with `user.id`
    /// and bump its modification time. Other columns are left alone.
    async fn update_by_id(&self, user: UserEntity) -> DomainResult<()>;
}

/// Single read/write surface for user records
///
/// Every lookup fails with `DomainError::NotFound` when no user matches.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> DomainResult<()>;

    async fn find_by_email(&self, email: &str) -> DomainResult<User>;

    /// Lookup by id, served from the cache when possible
    async fn find_by_id(&self, uid: i64) -> DomainResult<User>;

    async fn find_by_phone(&self, phone: &str) -> DomainResult<User>;

    async fn find_by_wechat(&self, open_id: &str) -> DomainResult<User>;

    /// Persist nickname, birthday and about-me; the caller supplies only
    /// values meant to change
    async fn update_non_zero_fields(&self, user: User) -> DomainResult<()>;
}
