//! Repository that reads through the user cache to the database.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

use super::entity::UserEntity;
use super::repopulate::CacheRepopulator;
use super::traits::{UserCache, UserDao, UserRepository};

/// Default number of pending cache refills
pub const DEFAULT_REPOPULATE_CAPACITY: usize = 1024;

/// [`UserRepository`] backed by a [`UserDao`] with a read-through [`UserCache`]
///
/// Only `find_by_id` consults the cache. Writes go straight to the database
/// and never invalidate: an updated profile stays stale in the cache until
/// its entry expires.
///
/// Any cache read failure, not just a miss, falls back to the database. A
/// cache outage therefore shows up as extra database load rather than as
/// failed lookups; the two cases are only told apart in the logs.
pub struct CachedUserRepository<D: ?Sized, C: ?Sized> {
    dao: Arc<D>,
    cache: Arc<C>,
    repopulator: CacheRepopulator,
}

impl<D, C> CachedUserRepository<D, C>
where
    D: UserDao + ?Sized,
    C: UserCache + ?Sized + 'static,
{
    /// Create the repository and start its cache refill task
    ///
    /// # Panics
    /// When called outside a Tokio runtime.
    pub fn new(dao: Arc<D>, cache: Arc<C>) -> Self {
        Self::with_capacity(dao, cache, DEFAULT_REPOPULATE_CAPACITY)
    }

    pub fn with_capacity(dao: Arc<D>, cache: Arc<C>, capacity: usize) -> Self {
        let repopulator = CacheRepopulator::spawn(cache.clone(), capacity);
        Self {
            dao,
            cache,
            repopulator,
        }
    }
}

#[async_trait]
impl<D, C> UserRepository for CachedUserRepository<D, C>
where
    D: UserDao + ?Sized,
    C: UserCache + ?Sized + 'static,
{
    async fn create(&self, user: User) -> DomainResult<()> {
        self.dao.insert(UserEntity::from(user)).await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<User> {
        self.dao.find_by_email(email).await.map(User::from)
    }

    async fn find_by_id(&self, uid: i64) -> DomainResult<User> {
        match self.cache.get(uid).await {
            Ok(user) => return Ok(user),
            Err(e) if e.is_not_found() => debug!(uid, "User cache miss"),
            Err(e) => warn!(
                uid,
                error = %e,
                "User cache read failed, falling back to database"
            ),
        }

        let user = User::from(self.dao.find_by_id(uid).await?);
        self.repopulator.submit(user.clone());
        Ok(user)
    }

    async fn find_by_phone(&self, phone: &str) -> DomainResult<User> {
        self.dao.find_by_phone(phone).await.map(User::from)
    }

    async fn find_by_wechat(&self, open_id: &str) -> DomainResult<User> {
        self.dao.find_by_wechat(open_id).await.map(User::from)
    }

    async fn update_non_zero_fields(&self, user: User) -> DomainResult<()> {
        self.dao.update_by_id(UserEntity::from(user)).await
    }
}
