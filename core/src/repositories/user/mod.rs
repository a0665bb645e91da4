mod cached;
mod entity;
mod repopulate;
mod traits;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
mod tests;

pub use cached::{CachedUserRepository, DEFAULT_REPOPULATE_CAPACITY};
pub use entity::UserEntity;
pub use repopulate::CacheRepopulator;
pub use traits::{user_key, UserCache, UserDao, UserRepository};
